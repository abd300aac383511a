//! Inventory use-case boundary.
//!
//! # Responsibility
//! - Scope one connection and one transaction to each public operation.
//! - Turn every failure into a logged message and a benign return value.

pub mod inventory;
