//! Inventory domain model.
//!
//! # Responsibility
//! - Define the product taxonomy (base product plus two variants).
//! - Own field validation so persistence and callers share one policy.

pub mod product;
