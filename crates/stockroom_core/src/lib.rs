//! Core inventory logic for Stockroom.
//! Owns the product taxonomy, its validation rules and SQLite persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::product::{
    parse_id, parse_price, parse_stock, Product, ProductId, ProductRecord,
    ProductValidationError, ProductVariant,
};
pub use repo::product_repo::{
    ProductRepository, RepoError, RepoResult, SqliteProductRepository,
};
pub use service::inventory::{ActionOutcome, Inventory};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
