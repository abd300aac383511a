//! Inventory operation boundary.
//!
//! # Responsibility
//! - Expose one call per CRUD action for shell-like callers.
//! - Open a fresh connection per call and release it on every exit path.
//!
//! # Invariants
//! - No error crosses this boundary; failures resolve to a logged message
//!   plus `ActionOutcome::failure`, `None`, or an empty list.
//! - A failed write leaves storage in its pre-call state.

use crate::config::StoreConfig;
use crate::db::open_db;
use crate::model::product::{Product, ProductId};
use crate::repo::product_repo::{
    ProductRepository, RepoError, RepoResult, SqliteProductRepository,
};
use log::{error, info, log, Level};
use std::path::{Path, PathBuf};

/// Result envelope for write operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the write was committed.
    pub ok: bool,
    /// Product the operation targeted.
    pub id: ProductId,
    /// Human-readable result for the caller to print.
    pub message: String,
}

impl ActionOutcome {
    fn success(id: ProductId, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(id: ProductId, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id,
            message: message.into(),
        }
    }
}

/// Database-backed product inventory.
#[derive(Debug, Clone)]
pub struct Inventory {
    db_path: PathBuf,
}

impl Inventory {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.db_path.clone())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Persists a new product with its variant row.
    ///
    /// Fails without writing when the id already exists.
    pub fn create(&self, product: &Product) -> ActionOutcome {
        let id = product.id();
        match self.with_repo(|repo| repo.create_product(product)) {
            Ok(_) => {
                info!(
                    "event=product_create module=inventory status=ok id={id} variant={}",
                    product.variant().label()
                );
                ActionOutcome::success(id, format!("Product {id} saved."))
            }
            Err(err) => {
                self.log_failure("product_create", id, &err);
                ActionOutcome::failure(id, format!("Could not create product {id}: {err}"))
            }
        }
    }

    /// Loads one product; `None` when absent or on any failure.
    pub fn read_by_id(&self, id: ProductId) -> Option<Product> {
        match self.with_repo(|repo| repo.get_product(id)) {
            Ok(Some(product)) => Some(product),
            Ok(None) => {
                self.log_failure("product_read", id, &RepoError::NotFound(id));
                None
            }
            Err(err) => {
                self.log_failure("product_read", id, &err);
                None
            }
        }
    }

    /// Changes only the price of an existing product.
    pub fn update_price(&self, id: ProductId, new_price: f64) -> ActionOutcome {
        match self.with_repo(|repo| repo.update_price(id, new_price)) {
            Ok(()) => {
                info!("event=product_update_price module=inventory status=ok id={id}");
                ActionOutcome::success(id, format!("Price updated for product {id}."))
            }
            Err(err) => {
                self.log_failure("product_update_price", id, &err);
                ActionOutcome::failure(id, format!("Could not update product {id}: {err}"))
            }
        }
    }

    /// Removes a product and its variant row.
    pub fn delete(&self, id: ProductId) -> ActionOutcome {
        match self.with_repo(|repo| repo.delete_product(id)) {
            Ok(()) => {
                info!("event=product_delete module=inventory status=ok id={id}");
                ActionOutcome::success(id, format!("Product {id} deleted."))
            }
            Err(err) => {
                self.log_failure("product_delete", id, &err);
                ActionOutcome::failure(id, format!("Could not delete product {id}: {err}"))
            }
        }
    }

    /// Lists all products with variants resolved; empty on failure.
    pub fn list_all(&self) -> Vec<Product> {
        match self.with_repo(|repo| repo.list_products()) {
            Ok(products) => {
                info!(
                    "event=product_list module=inventory status=ok count={}",
                    products.len()
                );
                products
            }
            Err(err) => {
                error!(
                    "event=product_list module=inventory status=error db_path={} error={err}",
                    self.db_path.display()
                );
                Vec::new()
            }
        }
    }

    fn log_failure(&self, event: &str, id: ProductId, err: &RepoError) {
        let level = failure_level(err);
        let status = if level == Level::Warn {
            "rejected"
        } else {
            "error"
        };
        log!(
            level,
            "event={event} module=inventory status={status} id={id} db_path={} error={err}",
            self.db_path.display()
        );
    }

    fn with_repo<T>(
        &self,
        op: impl FnOnce(&mut SqliteProductRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut conn = open_db(&self.db_path)?;
        let mut repo = SqliteProductRepository::new(&mut conn);
        op(&mut repo)
    }
}

/// Rejections (missing id, duplicate id, bad input) log as warnings,
/// storage failures as errors.
fn failure_level(err: &RepoError) -> Level {
    match err {
        RepoError::NotFound(_) | RepoError::AlreadyExists(_) | RepoError::Validation(_) => {
            Level::Warn
        }
        RepoError::Db(_) | RepoError::InvalidData(_) => Level::Error,
    }
}
