//! Predicate builder.
//!
//! Turns a [`MovementFilter`] into AND-joined SQL fragments with positional
//! `?` placeholders and the matching parameter vector. Caller values only
//! ever travel in the parameter vector.
//!
//! `%` and `_` inside provider or type filters are NOT escaped and act as
//! LIKE wildcards.

use chrono::NaiveDate;

use super::filter::MovementFilter;

/// A value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// Text value.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer (limits and offsets).
    UInt(u64),
}

/// Ordered condition fragments and their bound parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    fragments: Vec<&'static str>,
    values: Vec<SqlValue>,
}

impl Predicate {
    /// Condition fragments in emission order.
    #[must_use]
    pub fn fragments(&self) -> &[&'static str] {
        &self.fragments
    }

    /// Parameters in placeholder order.
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Returns true if no condition was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// `WHERE <clause>`, or an empty string when there is no condition.
    #[must_use]
    pub fn where_clause(&self) -> String {
        self.where_with(&[])
    }

    /// `WHERE` over the predicate plus fixed conditions that carry no
    /// parameters. Fixed conditions are appended after the predicate so the
    /// parameter order is unchanged.
    #[must_use]
    pub fn where_with(&self, fixed: &[&str]) -> String {
        let mut all: Vec<&str> = self.fragments.clone();
        all.extend_from_slice(fixed);
        if all.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", all.join(" AND "))
        }
    }
}

/// Accumulates `(fragment, parameter)` pairs.
#[derive(Debug, Default)]
pub struct PredicateBuilder {
    predicate: Predicate,
}

impl PredicateBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one condition and the value for its single placeholder.
    #[must_use]
    pub fn push(mut self, fragment: &'static str, value: SqlValue) -> Self {
        self.predicate.fragments.push(fragment);
        self.predicate.values.push(value);
        self
    }

    /// Finishes the predicate.
    #[must_use]
    pub fn finish(self) -> Predicate {
        self.predicate
    }

    /// Builds the predicate for `filter`.
    ///
    /// Rules run in a fixed order: date from, date to, client, provider,
    /// transaction type. Absent fields emit nothing.
    #[must_use]
    pub fn build(filter: &MovementFilter) -> Predicate {
        let mut builder = Self::new();
        if let Some(from) = filter.date_from {
            builder = builder.push("f.Fecha >= ?", SqlValue::Date(from));
        }
        if let Some(to) = filter.date_to {
            builder = builder.push("f.Fecha <= ?", SqlValue::Date(to));
        }
        if let Some(client_id) = filter.client_id {
            builder = builder.push("m.ClienteDWH = ?", SqlValue::Int(client_id));
        }
        if let Some(provider) = &filter.provider_name {
            builder = builder.push("p.NombreProveedor LIKE ?", contains(provider));
        }
        if let Some(kind) = &filter.transaction_type {
            builder = builder.push("t.NombreTipoTransaccion LIKE ?", contains(kind));
        }
        builder.finish()
    }
}

fn contains(value: &str) -> SqlValue {
    SqlValue::Text(format!("%{value}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_builds_empty_predicate() {
        let predicate = PredicateBuilder::build(&MovementFilter::new());
        assert!(predicate.is_empty());
        assert!(predicate.values().is_empty());
        assert_eq!(predicate.where_clause(), "");
    }

    #[test]
    fn test_full_filter_order_and_values() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).expect("valid date");
        let filter = MovementFilter::new()
            .with_date_from(from)
            .with_date_to(to)
            .with_client(9)
            .with_provider("Fabrikam")
            .with_transaction_type("Compra");

        let predicate = PredicateBuilder::build(&filter);

        assert_eq!(
            predicate.fragments(),
            &[
                "f.Fecha >= ?",
                "f.Fecha <= ?",
                "m.ClienteDWH = ?",
                "p.NombreProveedor LIKE ?",
                "t.NombreTipoTransaccion LIKE ?",
            ]
        );
        assert_eq!(
            predicate.values(),
            &[
                SqlValue::Date(from),
                SqlValue::Date(to),
                SqlValue::Int(9),
                SqlValue::Text("%Fabrikam%".into()),
                SqlValue::Text("%Compra%".into()),
            ]
        );
    }

    #[test]
    fn test_where_clause_joins_with_and() {
        let filter = MovementFilter::new()
            .with_client(3)
            .with_provider("Lit");
        let predicate = PredicateBuilder::build(&filter);
        assert_eq!(
            predicate.where_clause(),
            "WHERE m.ClienteDWH = ? AND p.NombreProveedor LIKE ?"
        );
    }

    #[test]
    fn test_where_with_fixed_conditions_on_empty_predicate() {
        let predicate = PredicateBuilder::build(&MovementFilter::new());
        assert_eq!(
            predicate.where_with(&["m.ClienteDWH > 0"]),
            "WHERE m.ClienteDWH > 0"
        );
    }

    #[test]
    fn test_like_wildcards_pass_through_unescaped() {
        let filter = MovementFilter::new().with_provider("50%_off");
        let predicate = PredicateBuilder::build(&filter);
        assert_eq!(predicate.values(), &[SqlValue::Text("%50%_off%".into())]);
    }
}
