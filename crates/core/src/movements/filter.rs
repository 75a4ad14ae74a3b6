//! Filter model for movement reports.
//!
//! Caller criteria arrive as loose query-string values. They are validated
//! and normalized here once, so the predicate builder only ever sees fields
//! that are really meant to filter.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::error::MovementError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw, unvalidated filter criteria as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct FilterInput {
    /// Inclusive lower date bound.
    pub date_from: Option<String>,
    /// Inclusive upper date bound.
    pub date_to: Option<String>,
    /// Client id, or a sentinel meaning "any client".
    pub client_id: Option<String>,
    /// Substring of the provider name.
    pub provider_name: Option<String>,
    /// Substring of the transaction type name.
    pub transaction_type: Option<String>,
}

/// Validated filter criteria. A `None` field never reaches the predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementFilter {
    /// Inclusive lower date bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound. Not checked against `date_from`.
    pub date_to: Option<NaiveDate>,
    /// Client id; sentinel values are already removed.
    pub client_id: Option<i64>,
    /// Case-insensitive "contains" match on the provider name.
    pub provider_name: Option<String>,
    /// Case-insensitive "contains" match on the transaction type name.
    pub transaction_type: Option<String>,
}

impl MovementFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates raw caller criteria.
    ///
    /// # Errors
    ///
    /// Returns an error if a date is not `YYYY-MM-DD` or the client id is
    /// neither a sentinel nor an integer.
    pub fn parse(input: &FilterInput) -> Result<Self, MovementError> {
        Ok(Self {
            date_from: parse_date("fechaDesde", input.date_from.as_deref())?,
            date_to: parse_date("fechaHasta", input.date_to.as_deref())?,
            client_id: parse_client_id(input.client_id.as_deref())?,
            provider_name: non_blank(input.provider_name.as_deref()),
            transaction_type: non_blank(input.transaction_type.as_deref()),
        })
    }

    /// Sets the inclusive lower date bound.
    #[must_use]
    pub const fn with_date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    /// Sets the inclusive upper date bound.
    #[must_use]
    pub const fn with_date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Restricts to one client. `0` is the "any client" sentinel.
    #[must_use]
    pub const fn with_client(mut self, client_id: i64) -> Self {
        self.client_id = if client_id == 0 { None } else { Some(client_id) };
        self
    }

    /// Restricts to providers whose name contains `name`.
    #[must_use]
    pub fn with_provider(mut self, name: &str) -> Self {
        self.provider_name = non_blank(Some(name));
        self
    }

    /// Restricts to transaction types whose name contains `name`.
    #[must_use]
    pub fn with_transaction_type(mut self, name: &str) -> Self {
        self.transaction_type = non_blank(Some(name));
        self
    }
}

/// Applies the client sentinel policy.
///
/// Absent, empty, `"null"` and any integer equal to zero mean "no client
/// filter"; `0` also marks unknown clients in the fact table, so it is never
/// used as a match target.
///
/// # Errors
///
/// Returns an error if the value is not a sentinel and not an integer.
pub fn parse_client_id(raw: Option<&str>) -> Result<Option<i64>, MovementError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    match value.parse::<i64>() {
        Ok(0) => Ok(None),
        Ok(id) => Ok(Some(id)),
        Err(_) => Err(MovementError::InvalidClientId(value.to_string())),
    }
}

fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, MovementError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| MovementError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Time-bucket width of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar date.
    Day,
    /// One bucket per ISO week, keyed by its Monday.
    Week,
    /// One bucket per month, keyed by its first day.
    Month,
}

impl Granularity {
    /// Reads the `granularity` parameter.
    ///
    /// Only an absent parameter means `Month`. Matching is exact, so an
    /// empty or differently cased value falls back to `Day` like any other
    /// unrecognized one.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None | Some("month") => Self::Month,
            Some("week") => Self::Week,
            Some(_) => Self::Day,
        }
    }

    /// SQL expression yielding the bucket key of `f.Fecha` as `YYYY-MM-DD`.
    #[must_use]
    pub const fn bucket_sql(self) -> &'static str {
        match self {
            Self::Day => "DATE_FORMAT(f.Fecha, '%Y-%m-%d')",
            Self::Week => {
                "DATE_FORMAT(DATE_SUB(f.Fecha, INTERVAL WEEKDAY(f.Fecha) DAY), '%Y-%m-%d')"
            }
            Self::Month => "DATE_FORMAT(f.Fecha, '%Y-%m-01')",
        }
    }

    /// Returns the bucket key for `date`, matching [`Self::bucket_sql`].
    #[must_use]
    pub fn bucket(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => date - Duration::days(i64::from(date.weekday().num_days_from_monday())),
            Self::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

/// Which filter option list to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Provider names.
    Providers,
    /// Transaction type names.
    Types,
    /// Client ids present in the fact table.
    Clients,
}

impl OptionKind {
    /// Parses the `/api/options/{tipo}` path segment.
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than the three known kinds.
    pub fn from_path(raw: &str) -> Result<Self, MovementError> {
        match raw {
            "proveedores" | "providers" => Ok(Self::Providers),
            "tipos" | "types" => Ok(Self::Types),
            "clientes" | "clients" => Ok(Self::Clients),
            other => Err(MovementError::UnknownOptionKind(other.to_string())),
        }
    }
}
