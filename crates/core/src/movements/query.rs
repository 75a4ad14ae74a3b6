//! Query composer.
//!
//! Every read shape shares the predicate from [`PredicateBuilder`] and
//! differs only in the [`Template`] wrapped around it. SQL is written for
//! MySQL (`?` placeholders, `DATE_FORMAT`, `WEEKDAY`).

use wwi_shared::types::PageRequest;

use super::filter::{Granularity, MovementFilter, OptionKind};
use super::predicate::{Predicate, PredicateBuilder, SqlValue};

/// Maximum number of providers in the summary ranking.
pub const TOP_PROVIDERS_LIMIT: u32 = 15;

/// Maximum number of clients in the summary ranking.
pub const TOP_CLIENTS_LIMIT: u32 = 15;

/// Maximum number of entries in an option list.
pub const OPTIONS_LIMIT: u32 = 100;

const FACT_JOINS: &str = "FROM FACT_Movimientos m
JOIN DIM_Fecha f ON m.FechaDWH = f.FechaDWH
JOIN DIM_Proveedor p ON m.ProveedorDWH = p.ProveedorDWH
JOIN DIM_TipoTransaccion t ON m.TipoTransaccionDWH = t.TipoTransaccionDWH";

const MAGNITUDE: &str = "COALESCE(SUM(ABS(m.Cantidad)), 0)";

/// Known client: id present and positive.
const KNOWN_CLIENT: &str = "m.ClienteDWH IS NOT NULL AND m.ClienteDWH > 0";

/// SQL text with its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// Statement text with `?` placeholders.
    pub sql: String,
    /// Values in placeholder order.
    pub values: Vec<SqlValue>,
}

impl CompiledQuery {
    fn new(sql: String, values: Vec<SqlValue>) -> Self {
        Self { sql, values }
    }

    /// Number of `?` placeholders in the statement text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Appends `LIMIT ? OFFSET ?`, binding limit then offset.
    #[must_use]
    fn paginate(mut self, page: PageRequest) -> Self {
        self.sql.push_str("\nLIMIT ? OFFSET ?");
        self.values.push(SqlValue::UInt(page.limit));
        self.values.push(SqlValue::UInt(page.offset));
        self
    }
}

/// Detail listing plus the count query sharing its predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailQueries {
    /// Page of raw movements.
    pub data: CompiledQuery,
    /// `COUNT(*)` over the same joins and predicate, without limit/offset.
    pub count: CompiledQuery,
}

/// KPI query and the three breakdowns of a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryQueries {
    /// Row count, total magnitude, active clients, active providers.
    pub kpis: CompiledQuery,
    /// Providers ranked by magnitude.
    pub top_providers: CompiledQuery,
    /// Known clients ranked by magnitude.
    pub top_clients: CompiledQuery,
    /// Magnitude per transaction type.
    pub transaction_types: CompiledQuery,
}

/// Join/aggregation template applied around a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Raw movement columns, newest first.
    Detail,
    /// Row count for the detail listing.
    Count,
    /// Summary KPIs.
    Kpis,
    /// Top providers by magnitude.
    TopProviders,
    /// Top known clients by magnitude.
    TopClients,
    /// Magnitude distribution over transaction types.
    TransactionTypes,
    /// Magnitude per time bucket.
    Timeline(Granularity),
}

impl Template {
    /// Renders the template around `predicate`.
    ///
    /// The parameter vector is the predicate's, unchanged.
    #[must_use]
    pub fn render(self, predicate: &Predicate) -> CompiledQuery {
        let filter = predicate.where_clause();
        let sql = match self {
            Self::Detail => format!(
                "SELECT
    DATE_FORMAT(f.Fecha, '%Y-%m-%d') AS Fecha,
    COALESCE(m.ClienteDWH, 0) AS ClienteID,
    CONCAT('Cliente ', COALESCE(m.ClienteDWH, 0)) AS ClienteNombre,
    p.NombreProveedor AS ProveedorNombre,
    t.NombreTipoTransaccion AS TipoTransaccion,
    m.Cantidad AS Cantidad,
    m.ProductoDWH AS ProductoDWH,
    m.FacturaID AS FacturaID
{FACT_JOINS}
{filter}
ORDER BY f.Fecha DESC, m.FacturaID DESC"
            ),
            Self::Count => format!("SELECT COUNT(*) AS total\n{FACT_JOINS}\n{filter}"),
            Self::Kpis => format!(
                "SELECT
    COUNT(*) AS totalRegistros,
    {MAGNITUDE} AS totalMovimientos,
    COUNT(DISTINCT CASE WHEN {KNOWN_CLIENT} THEN m.ClienteDWH END) AS clientesActivos,
    COUNT(DISTINCT m.ProveedorDWH) AS proveedoresActivos
{FACT_JOINS}
{filter}"
            ),
            Self::TopProviders => format!(
                "SELECT p.NombreProveedor AS nombre, {MAGNITUDE} AS total
{FACT_JOINS}
{filter}
GROUP BY p.ProveedorDWH, p.NombreProveedor
ORDER BY total DESC, nombre ASC
LIMIT {TOP_PROVIDERS_LIMIT}"
            ),
            Self::TopClients => format!(
                "SELECT m.ClienteDWH AS clienteId, {MAGNITUDE} AS total
{FACT_JOINS}
{known}
GROUP BY m.ClienteDWH
HAVING total > 0
ORDER BY total DESC, clienteId ASC
LIMIT {TOP_CLIENTS_LIMIT}",
                known = predicate.where_with(&[KNOWN_CLIENT]),
            ),
            Self::TransactionTypes => format!(
                "SELECT t.NombreTipoTransaccion AS tipo, {MAGNITUDE} AS total
{FACT_JOINS}
{filter}
GROUP BY t.TipoTransaccionDWH, t.NombreTipoTransaccion
ORDER BY total DESC, tipo ASC"
            ),
            Self::Timeline(granularity) => {
                let bucket = granularity.bucket_sql();
                format!(
                    "SELECT
    {bucket} AS fecha,
    {MAGNITUDE} AS total,
    MIN(YEAR(f.Fecha)) AS anio,
    MIN(MONTH(f.Fecha)) AS mes
{FACT_JOINS}
{filter}
GROUP BY {bucket}
ORDER BY fecha ASC"
                )
            }
        };
        CompiledQuery::new(sql, predicate.values().to_vec())
    }
}

/// Builds the statements for each read shape.
pub struct QueryComposer;

impl QueryComposer {
    /// Detail page and its count.
    ///
    /// Limit and offset are appended after the predicate parameters; the
    /// count query binds the predicate parameters only.
    #[must_use]
    pub fn detail(filter: &MovementFilter, page: PageRequest) -> DetailQueries {
        let predicate = PredicateBuilder::build(filter);
        DetailQueries {
            data: Template::Detail.render(&predicate).paginate(page),
            count: Template::Count.render(&predicate),
        }
    }

    /// KPIs and breakdowns over one shared predicate.
    #[must_use]
    pub fn summary(filter: &MovementFilter) -> SummaryQueries {
        let predicate = PredicateBuilder::build(filter);
        SummaryQueries {
            kpis: Template::Kpis.render(&predicate),
            top_providers: Template::TopProviders.render(&predicate),
            top_clients: Template::TopClients.render(&predicate),
            transaction_types: Template::TransactionTypes.render(&predicate),
        }
    }

    /// Time series bucketed by `granularity`.
    #[must_use]
    pub fn timeline(filter: &MovementFilter, granularity: Granularity) -> CompiledQuery {
        Template::Timeline(granularity).render(&PredicateBuilder::build(filter))
    }

    /// Distinct option list. No filter applies.
    #[must_use]
    pub fn options(kind: OptionKind) -> CompiledQuery {
        let sql = match kind {
            OptionKind::Providers => format!(
                "SELECT DISTINCT p.NombreProveedor AS value, p.NombreProveedor AS label
FROM DIM_Proveedor p
ORDER BY p.NombreProveedor
LIMIT {OPTIONS_LIMIT}"
            ),
            OptionKind::Types => format!(
                "SELECT DISTINCT t.NombreTipoTransaccion AS value, t.NombreTipoTransaccion AS label
FROM DIM_TipoTransaccion t
ORDER BY t.NombreTipoTransaccion
LIMIT {OPTIONS_LIMIT}"
            ),
            OptionKind::Clients => format!(
                "SELECT DISTINCT m.ClienteDWH AS value, CONCAT('Cliente ', m.ClienteDWH) AS label
FROM FACT_Movimientos m
WHERE {KNOWN_CLIENT}
ORDER BY m.ClienteDWH
LIMIT {OPTIONS_LIMIT}"
            ),
        };
        CompiledQuery::new(sql, Vec::new())
    }

    /// Connectivity probe; the `test` column must read 2.
    #[must_use]
    pub fn health_check() -> CompiledQuery {
        CompiledQuery::new("SELECT 1+1 AS test".to_string(), Vec::new())
    }
}
