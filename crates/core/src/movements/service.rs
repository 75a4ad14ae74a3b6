//! Report assembly service.
//!
//! Shapes raw rows into the four report contracts. Every numeric field is
//! routed through the normalizer.

use chrono::{Datelike, NaiveDate};
use serde_json::Value as JsonValue;
use wwi_shared::types::{PageRequest, PageResponse};

use super::filter::{Granularity, OptionKind};
use super::normalize::{normalize_count, normalize_int, normalize_number};
use super::types::{
    ClientTotal, Kpis, MovementRow, OptionItem, OptionValue, ProviderTotal, Row, SummaryReport,
    TimelinePoint, TimelineReport, TypeTotal, client_label,
};

/// Service for assembling movement reports.
pub struct ReportService;

impl ReportService {
    /// Builds a detail page from data rows and the count query result.
    #[must_use]
    pub fn movement_page(
        rows: &[Row],
        count_rows: &[Row],
        page: PageRequest,
    ) -> PageResponse<MovementRow> {
        let total = normalize_count(first_field(count_rows, "total"));
        let data = rows.iter().map(Self::movement_row).collect();
        PageResponse::new(data, page, total)
    }

    fn movement_row(row: &Row) -> MovementRow {
        let client_id = normalize_int(row.get("ClienteID"));
        MovementRow {
            date: text(row, "Fecha"),
            client_id,
            client_name: text(row, "ClienteNombre").unwrap_or_else(|| client_label(client_id)),
            provider_name: text(row, "ProveedorNombre"),
            transaction_type: text(row, "TipoTransaccion"),
            quantity: normalize_number(row.get("Cantidad")),
            product_key: optional_int(row, "ProductoDWH"),
            invoice_id: optional_int(row, "FacturaID"),
        }
    }

    /// Builds a summary from the KPI row and the three breakdowns.
    #[must_use]
    pub fn summary(
        kpi_rows: &[Row],
        provider_rows: &[Row],
        client_rows: &[Row],
        type_rows: &[Row],
    ) -> SummaryReport {
        let kpis = Kpis {
            record_count: normalize_count(first_field(kpi_rows, "totalRegistros")),
            total_magnitude: normalize_number(first_field(kpi_rows, "totalMovimientos")),
            active_clients: normalize_count(first_field(kpi_rows, "clientesActivos")),
            active_providers: normalize_count(first_field(kpi_rows, "proveedoresActivos")),
        };

        let top_providers = provider_rows
            .iter()
            .map(|row| ProviderTotal {
                name: text(row, "nombre").unwrap_or_default(),
                total: normalize_number(row.get("total")),
            })
            .collect();

        let top_clients = client_rows
            .iter()
            .map(|row| {
                let client_id = normalize_int(row.get("clienteId"));
                ClientTotal {
                    client_id,
                    name: client_label(client_id),
                    total: normalize_number(row.get("total")),
                }
            })
            .collect();

        let transaction_types = type_rows
            .iter()
            .map(|row| TypeTotal {
                transaction_type: text(row, "tipo").unwrap_or_default(),
                total: normalize_number(row.get("total")),
            })
            .collect();

        SummaryReport {
            kpis,
            top_providers,
            top_clients,
            transaction_types,
        }
    }

    /// Builds a time series.
    ///
    /// Bucket keys are re-rendered as `YYYY-MM-DD`; a missing year or month
    /// is taken from the bucket date.
    #[must_use]
    pub fn timeline(rows: &[Row], granularity: Granularity) -> TimelineReport {
        let data = rows
            .iter()
            .map(|row| {
                let raw = text(row, "fecha").unwrap_or_default();
                let date = parse_bucket(&raw).map(|d| granularity.bucket(d));
                TimelinePoint {
                    bucket: date.map_or(raw, |d| d.format("%Y-%m-%d").to_string()),
                    total: normalize_number(row.get("total")),
                    year: int_or(row, "anio", date.map(|d| i64::from(d.year()))),
                    month: int_or(row, "mes", date.map(|d| i64::from(d.month()))),
                }
            })
            .collect();

        TimelineReport { data, granularity }
    }

    /// Builds an option list.
    #[must_use]
    pub fn options(kind: OptionKind, rows: &[Row]) -> Vec<OptionItem> {
        rows.iter()
            .map(|row| match kind {
                OptionKind::Clients => {
                    let client_id = normalize_int(row.get("value"));
                    OptionItem {
                        value: OptionValue::Id(client_id),
                        label: text(row, "label").unwrap_or_else(|| client_label(client_id)),
                    }
                }
                OptionKind::Providers | OptionKind::Types => {
                    let name = text(row, "value").unwrap_or_default();
                    OptionItem {
                        label: text(row, "label").unwrap_or_else(|| name.clone()),
                        value: OptionValue::Name(name),
                    }
                }
            })
            .collect()
    }

    /// Reads the connectivity probe: `1+1` must come back as 2.
    #[must_use]
    pub fn database_connected(rows: &[Row]) -> bool {
        normalize_int(first_field(rows, "test")) == 2
    }
}

fn first_field<'a>(rows: &'a [Row], key: &str) -> Option<&'a JsonValue> {
    rows.first().and_then(|row| row.get(key))
}

fn text(row: &Row, key: &str) -> Option<String> {
    match row.get(key)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn optional_int(row: &Row, key: &str) -> Option<i64> {
    match row.get(key) {
        None | Some(JsonValue::Null) => None,
        value => Some(normalize_int(value)),
    }
}

fn int_or(row: &Row, key: &str, fallback: Option<i64>) -> i64 {
    optional_int(row, key).or(fallback).unwrap_or(0)
}

fn parse_bucket(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
