//! Merchant-record lookups over a single in-memory tabular dataset,
//! exposed as three named tools for an external agent front end.

pub mod config;
pub mod dataset;
pub mod query;
pub mod tools;
