//! Movement report routes.
//!
//! Every handler validates its query string into a [`MovementFilter`]
//! before touching the warehouse, so malformed input never runs a query.

use axum::{
    Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;
use tracing::error;

use wwi_core::movements::{
    FilterInput, Granularity, MovementFilter, MovementRow, OptionItem, OptionKind, SummaryReport,
    TimelineReport,
};
use wwi_db::{MovementRepository, ReportQueryError};
use wwi_shared::types::{PageRequest, PageResponse};

use crate::{
    AppState,
    error::ApiError,
    response::{DataList, Success},
};

/// Creates the movement report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/movimientos", get(list_movements))
        .route("/summary", get(get_summary))
        .route("/timeline", get(get_timeline))
        .route("/options/{tipo}", get(get_options))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters shared by the report endpoints.
///
/// Everything arrives as text; validation happens in the filter model so
/// that lenient fields (pagination, granularity) can fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Inclusive lower date bound, `YYYY-MM-DD`.
    #[serde(rename = "fechaDesde")]
    pub date_from: Option<String>,
    /// Inclusive upper date bound, `YYYY-MM-DD`.
    #[serde(rename = "fechaHasta")]
    pub date_to: Option<String>,
    /// Client id; `0`, `null` or empty mean any client.
    #[serde(rename = "cliente")]
    pub client: Option<String>,
    /// Provider name substring.
    #[serde(rename = "proveedor")]
    pub provider: Option<String>,
    /// Transaction type substring.
    #[serde(rename = "tipo")]
    pub transaction_type: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Rows to skip.
    pub offset: Option<String>,
    /// Timeline bucket width.
    pub granularity: Option<String>,
}

impl ReportQuery {
    fn filter(&self) -> Result<MovementFilter, ApiError> {
        let input = FilterInput {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            client_id: self.client.clone(),
            provider_name: self.provider.clone(),
            transaction_type: self.transaction_type.clone(),
        };
        Ok(MovementFilter::parse(&input)?)
    }

    fn page(&self) -> PageRequest {
        PageRequest::from_raw(self.limit.as_deref(), self.offset.as_deref())
    }

    fn granularity(&self) -> Granularity {
        Granularity::from_param(self.granularity.as_deref())
    }
}

fn data_source_failure(route: &'static str) -> impl FnOnce(ReportQueryError) -> ApiError {
    move |e| {
        let err = ApiError::from(e);
        error!(route, code = err.0.error_code(), error = %err.0, "Report query failed");
        err
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /movimientos
async fn list_movements(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Success<PageResponse<MovementRow>>, ApiError> {
    let Query(query) = query?;
    let filter = query.filter()?;

    let repo = MovementRepository::new(state.db.clone());
    let page = repo
        .list_movements(&filter, query.page())
        .await
        .map_err(data_source_failure("movimientos"))?;

    Ok(Success::new(page))
}

/// GET /summary
async fn get_summary(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Success<SummaryReport>, ApiError> {
    let Query(query) = query?;
    let filter = query.filter()?;

    let repo = MovementRepository::new(state.db.clone());
    let report = repo
        .summary(&filter)
        .await
        .map_err(data_source_failure("summary"))?;

    Ok(Success::new(report))
}

/// GET /timeline
async fn get_timeline(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Success<TimelineReport>, ApiError> {
    let Query(query) = query?;
    let filter = query.filter()?;

    let repo = MovementRepository::new(state.db.clone());
    let report = repo
        .timeline(&filter, query.granularity())
        .await
        .map_err(data_source_failure("timeline"))?;

    Ok(Success::new(report))
}

/// GET /options/{tipo}
async fn get_options(
    State(state): State<AppState>,
    Path(tipo): Path<String>,
) -> Result<Success<DataList<OptionItem>>, ApiError> {
    let kind = OptionKind::from_path(&tipo)?;

    let repo = MovementRepository::new(state.db.clone());
    let data = repo
        .options(kind)
        .await
        .map_err(data_source_failure("options"))?;

    Ok(Success::new(DataList { data }))
}

#[cfg(test)]
#[path = "movements_tests.rs"]
mod tests;
