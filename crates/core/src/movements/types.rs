//! Report data types.
//!
//! Field names serialize to the keys the reporting front end reads.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::filter::Granularity;

/// One result row as returned by the data source.
pub type Row = serde_json::Map<String, JsonValue>;

/// Display label for a client id.
#[must_use]
pub fn client_label(client_id: i64) -> String {
    format!("Cliente {client_id}")
}

/// One movement in the detail listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementRow {
    /// Movement date, `YYYY-MM-DD`.
    #[serde(rename = "Fecha")]
    pub date: Option<String>,
    /// Client id, `0` when unknown.
    #[serde(rename = "ClienteID")]
    pub client_id: i64,
    /// Client display label.
    #[serde(rename = "ClienteNombre")]
    pub client_name: String,
    /// Provider name.
    #[serde(rename = "ProveedorNombre")]
    pub provider_name: Option<String>,
    /// Transaction type name.
    #[serde(rename = "TipoTransaccion")]
    pub transaction_type: Option<String>,
    /// Signed quantity as recorded.
    #[serde(rename = "Cantidad", with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Product surrogate key.
    #[serde(rename = "ProductoDWH")]
    pub product_key: Option<i64>,
    /// Invoice id.
    #[serde(rename = "FacturaID")]
    pub invoice_id: Option<i64>,
}

/// Headline figures of a summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    /// Matching fact rows.
    #[serde(rename = "totalRegistros")]
    pub record_count: u64,
    /// Sum of absolute quantities.
    #[serde(rename = "totalMovimientos", with = "rust_decimal::serde::float")]
    pub total_magnitude: Decimal,
    /// Distinct known clients.
    #[serde(rename = "clientesActivos")]
    pub active_clients: u64,
    /// Distinct providers.
    #[serde(rename = "proveedoresActivos")]
    pub active_providers: u64,
}

/// Provider entry of the summary ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderTotal {
    /// Provider name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Sum of absolute quantities.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Client entry of the summary ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientTotal {
    /// Client id (always positive).
    #[serde(rename = "clienteId")]
    pub client_id: i64,
    /// Client display label.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Sum of absolute quantities.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Transaction type entry of the summary distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeTotal {
    /// Transaction type name.
    #[serde(rename = "tipo")]
    pub transaction_type: String,
    /// Sum of absolute quantities.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// KPIs plus breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Headline figures.
    pub kpis: Kpis,
    /// Top providers, descending by total.
    #[serde(rename = "topProveedores")]
    pub top_providers: Vec<ProviderTotal>,
    /// Top known clients, descending by total.
    #[serde(rename = "topClientes")]
    pub top_clients: Vec<ClientTotal>,
    /// Every transaction type, descending by total.
    #[serde(rename = "tiposTransaccion")]
    pub transaction_types: Vec<TypeTotal>,
}

/// One bucket of a timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// Bucket key, `YYYY-MM-DD`.
    #[serde(rename = "fecha")]
    pub bucket: String,
    /// Sum of absolute quantities in the bucket.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Year of the bucket.
    #[serde(rename = "anio")]
    pub year: i64,
    /// Month of the bucket.
    #[serde(rename = "mes")]
    pub month: i64,
}

/// Time series with the bucket width that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineReport {
    /// Buckets in ascending order.
    pub data: Vec<TimelinePoint>,
    /// Effective bucket width.
    pub granularity: Granularity,
}

/// Value of a filter option: a client id or a dimension name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Client id.
    Id(i64),
    /// Provider or transaction type name.
    Name(String),
}

/// One entry of an option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionItem {
    /// Value to send back as a filter.
    pub value: OptionValue,
    /// Text to display.
    pub label: String,
}
