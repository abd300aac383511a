//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define CRUD data access contracts for products.
//! - Isolate SQLite query details from the inventory boundary.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `AlreadyExists`)
//!   in addition to DB transport errors.

pub mod product_repo;
