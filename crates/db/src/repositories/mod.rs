//! Repository abstractions for data access.
//!
//! Repositories hide the `SeaORM` statement plumbing from the rest of the
//! application.

pub mod movement;

pub use movement::{MovementRepository, ReportQueryError};
