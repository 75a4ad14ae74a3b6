//! Core logic for the WWI movements reporting API.
//!
//! This crate contains pure logic with ZERO web or database dependencies.
//! It turns caller criteria into parameterized SQL and turns result rows
//! into report shapes; executing the SQL is left to the `db` crate.
//!
//! # Modules
//!
//! - `movements` - Filter model, predicate builder, query composer,
//!   numeric normalizer and report assembly over `FACT_Movimientos`

pub mod movements;
