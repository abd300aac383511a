//! Product repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Map the product taxonomy onto `products` plus one satellite table
//!   per variant (`original_variant`, `non_original_variant`).
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Each write runs in one transaction; nothing is committed on error.
//! - Satellite rows are removed before their base row.
//! - Variant resolution checks `original_variant` first, then
//!   `non_original_variant`, and falls back to a plain product.
//! - Rows read back are re-validated instead of trusted.

use crate::db::DbError;
use crate::model::product::{
    validate_price, Product, ProductId, ProductValidationError, ProductVariant,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    category,
    price,
    stock
FROM products";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for product persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProductValidationError),
    Db(DbError),
    NotFound(ProductId),
    AlreadyExists(ProductId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "product already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::AlreadyExists(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ProductValidationError> for RepoError {
    fn from(value: ProductValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for product CRUD operations.
pub trait ProductRepository {
    /// Returns whether a base row exists for `id`.
    fn exists(&self, id: ProductId) -> RepoResult<bool>;
    /// Inserts base and satellite rows; fails with `AlreadyExists` on duplicate id.
    fn create_product(&mut self, product: &Product) -> RepoResult<ProductId>;
    /// Loads one product with its variant resolved.
    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// Replaces the price of an existing product.
    fn update_price(&mut self, id: ProductId, price: f64) -> RepoResult<()>;
    /// Removes satellite rows, then the base row.
    fn delete_product(&mut self, id: ProductId) -> RepoResult<()>;
    /// Lists every product ordered by id.
    fn list_products(&self) -> RepoResult<Vec<Product>>;
}

/// SQLite-backed product repository over a migrated connection.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn exists(&self, id: ProductId) -> RepoResult<bool> {
        product_exists(self.conn, id)
    }

    fn create_product(&mut self, product: &Product) -> RepoResult<ProductId> {
        let id = product.id();
        let tx = self.conn.transaction()?;

        if product_exists(&tx, id)? {
            return Err(RepoError::AlreadyExists(id));
        }

        tx.execute(
            "INSERT INTO products (id, name, category, price, stock)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id,
                product.name(),
                product.category(),
                product.price(),
                product.stock(),
            ],
        )?;

        match product.variant() {
            ProductVariant::Plain => {}
            ProductVariant::Original { status } => {
                tx.execute(
                    "INSERT INTO original_variant (id, status) VALUES (?1, ?2);",
                    params![id, status],
                )?;
            }
            ProductVariant::NonOriginal { origin } => {
                tx.execute(
                    "INSERT INTO non_original_variant (id, origin) VALUES (?1, ?2);",
                    params![id, origin],
                )?;
            }
        }

        tx.commit()?;
        Ok(id)
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let base = self
            .conn
            .query_row(
                &format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_base_row,
            )
            .optional()?;

        match base {
            Some(base) => {
                let variant = load_variant(self.conn, id)?;
                Ok(Some(base.into_product(variant)?))
            }
            None => Ok(None),
        }
    }

    fn update_price(&mut self, id: ProductId, price: f64) -> RepoResult<()> {
        let price = validate_price(price)?;
        let tx = self.conn.transaction()?;

        if !product_exists(&tx, id)? {
            return Err(RepoError::NotFound(id));
        }

        tx.execute(
            "UPDATE products SET price = ?1 WHERE id = ?2;",
            params![price, id],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_product(&mut self, id: ProductId) -> RepoResult<()> {
        let tx = self.conn.transaction()?;

        if !product_exists(&tx, id)? {
            return Err(RepoError::NotFound(id));
        }

        tx.execute("DELETE FROM original_variant WHERE id = ?1;", [id])?;
        tx.execute("DELETE FROM non_original_variant WHERE id = ?1;", [id])?;
        tx.execute("DELETE FROM products WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(())
    }

    fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt
            .query_map([], read_base_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|base| {
                let variant = load_variant(self.conn, base.id)?;
                base.into_product(variant)
            })
            .collect()
    }
}

/// Base-table projection before the variant is known.
struct BaseRow {
    id: ProductId,
    name: String,
    category: String,
    price: f64,
    stock: i64,
}

impl BaseRow {
    fn into_product(self, variant: ProductVariant) -> RepoResult<Product> {
        let id = self.id;
        Product::with_variant(
            self.id,
            self.name,
            self.category,
            self.price,
            self.stock,
            variant,
        )
        .map_err(|err| RepoError::InvalidData(format!("products row {id}: {err}")))
    }
}

fn read_base_row(row: &Row<'_>) -> rusqlite::Result<BaseRow> {
    Ok(BaseRow {
        id: row.get("id")?,
        name: row.get("name")?,
        category: row.get("category")?,
        price: row.get("price")?,
        stock: row.get("stock")?,
    })
}

fn product_exists(conn: &Connection, id: ProductId) -> RepoResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1);",
        [id],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}

fn load_variant(conn: &Connection, id: ProductId) -> RepoResult<ProductVariant> {
    let status = conn
        .query_row(
            "SELECT status FROM original_variant WHERE id = ?1;",
            [id],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    if let Some(status) = status {
        return Ok(ProductVariant::Original { status });
    }

    let origin = conn
        .query_row(
            "SELECT origin FROM non_original_variant WHERE id = ?1;",
            [id],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(match origin {
        Some(origin) => ProductVariant::NonOriginal { origin },
        None => ProductVariant::Plain,
    })
}
