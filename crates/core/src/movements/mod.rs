//! Reporting over the movements star schema.
//!
//! Data flows through this module as:
//! caller criteria -> [`MovementFilter`] -> [`PredicateBuilder`] ->
//! [`QueryComposer`] -> (data source) -> [`normalize`] -> [`ReportService`].

pub mod error;
pub mod filter;
pub mod normalize;
pub mod predicate;
pub mod query;
pub mod service;
pub mod types;


pub use error::MovementError;
pub use filter::{FilterInput, Granularity, MovementFilter, OptionKind};
pub use normalize::{normalize_count, normalize_int, normalize_number};
pub use predicate::{Predicate, PredicateBuilder, SqlValue};
pub use query::{CompiledQuery, DetailQueries, QueryComposer, SummaryQueries, Template};
pub use service::ReportService;
pub use types::*;
