//! Movement report repository.
//!
//! Runs statements composed by [`QueryComposer`] against the warehouse and
//! hands the raw rows to [`ReportService`]. Statements run one after another
//! on the pool, outside any transaction.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult, Statement, Value};
use serde_json::Value as JsonValue;
use tracing::debug;

use wwi_core::movements::{
    CompiledQuery, Granularity, MovementFilter, MovementRow, OptionItem, OptionKind,
    QueryComposer, ReportService, Row, SqlValue, SummaryReport, TimelineReport,
};
use wwi_shared::AppError;
use wwi_shared::types::{PageRequest, PageResponse};

/// Error types for report queries.
#[derive(Debug, thiserror::Error)]
pub enum ReportQueryError {
    /// The warehouse rejected or failed a statement.
    #[error("{0}")]
    Database(#[from] DbErr),
}

impl From<ReportQueryError> for AppError {
    fn from(err: ReportQueryError) -> Self {
        match err {
            ReportQueryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Repository for movement reports.
#[derive(Debug)]
pub struct MovementRepository {
    db: Arc<DatabaseConnection>,
}

impl MovementRepository {
    /// Creates a new movement repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Executes one composed statement and returns its rows as JSON objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn fetch(&self, query: &CompiledQuery) -> Result<Vec<Row>, ReportQueryError> {
        debug!(sql = %query.sql, params = ?query.values, "Executing report query");

        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            query.sql.as_str(),
            query.values.iter().map(bind_value),
        );
        let rows = JsonValue::find_by_statement(statement).all(self.db.as_ref()).await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row {
                JsonValue::Object(map) => Some(map),
                _ => None,
            })
            .collect())
    }

    /// Lists one page of movements plus the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_movements(
        &self,
        filter: &MovementFilter,
        page: PageRequest,
    ) -> Result<PageResponse<MovementRow>, ReportQueryError> {
        let queries = QueryComposer::detail(filter, page);
        let rows = self.fetch(&queries.data).await?;
        let count = self.fetch(&queries.count).await?;
        Ok(ReportService::movement_page(&rows, &count, page))
    }

    /// Computes KPIs and the provider, client and type breakdowns.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the four queries fails.
    pub async fn summary(&self, filter: &MovementFilter) -> Result<SummaryReport, ReportQueryError> {
        let queries = QueryComposer::summary(filter);
        let kpis = self.fetch(&queries.kpis).await?;
        let providers = self.fetch(&queries.top_providers).await?;
        let clients = self.fetch(&queries.top_clients).await?;
        let types = self.fetch(&queries.transaction_types).await?;
        Ok(ReportService::summary(&kpis, &providers, &clients, &types))
    }

    /// Computes the magnitude time series.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn timeline(
        &self,
        filter: &MovementFilter,
        granularity: Granularity,
    ) -> Result<TimelineReport, ReportQueryError> {
        let rows = self
            .fetch(&QueryComposer::timeline(filter, granularity))
            .await?;
        Ok(ReportService::timeline(&rows, granularity))
    }

    /// Lists the distinct values of one filter dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn options(&self, kind: OptionKind) -> Result<Vec<OptionItem>, ReportQueryError> {
        let rows = self.fetch(&QueryComposer::options(kind)).await?;
        Ok(ReportService::options(kind, &rows))
    }

    /// Runs the connectivity probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the warehouse cannot be reached.
    pub async fn ping(&self) -> Result<bool, ReportQueryError> {
        let rows = self.fetch(&QueryComposer::health_check()).await?;
        Ok(ReportService::database_connected(&rows))
    }
}

fn bind_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Text(s) => Value::from(s.clone()),
        SqlValue::Date(d) => Value::from(*d),
        SqlValue::Int(i) => Value::from(*i),
        SqlValue::UInt(u) => Value::from(*u),
    }
}

#[cfg(test)]
#[path = "movement_tests.rs"]
mod tests;
