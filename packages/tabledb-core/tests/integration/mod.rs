//! Integration test suite for the store surface.
//!
//! Sections:
//! 1. Schema and content operations
//! 2. Persistence through the store
//! 3. Intersection
//! 4. Full workflow

pub mod end_to_end_tests;
pub mod persistence_tests;
