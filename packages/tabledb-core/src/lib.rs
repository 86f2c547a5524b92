//! Core of an embedded tabular database.
//!
//! A [`database::Database`] holds named tables with typed columns and rows of
//! string cells. [`store::Store`] owns the active database and is the entry
//! point for every mutation, persistence call and intersection query.

pub mod config;
pub mod database;
pub mod error;
pub mod intersection;
pub mod persistence;
pub mod store;
pub mod table;
pub mod types;

pub use error::{ErrorCategory, StoreError};
pub use store::Store;
