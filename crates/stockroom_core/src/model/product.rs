//! Product domain model.
//!
//! # Responsibility
//! - Define the base product record and its mutually exclusive variants.
//! - Validate numeric fields at construction and on every later mutation.
//! - Provide the plain key-value record shape used for serialization.
//!
//! # Invariants
//! - `id` is a positive integer.
//! - `price` is finite and `>= 0`; `stock` is `>= 0`.
//! - `name`/`category` are stored raw; capitalization is presentation-only.
//! - A product is at most one variant (`Original` xor `NonOriginal`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable product identifier shared by base and satellite rows.
pub type ProductId = i64;

/// Validation failure raised by product construction or mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductValidationError {
    /// Identifier text is not an integer.
    InvalidId(String),
    /// Identifier is zero or negative.
    NonPositiveId(ProductId),
    /// Price text is not a finite real number.
    InvalidPrice(String),
    /// Price is below zero.
    NegativePrice(f64),
    /// Stock text is not an integer.
    InvalidStock(String),
    /// Stock is below zero.
    NegativeStock(i64),
    /// Record carries both `status` and `origin`.
    AmbiguousVariant(ProductId),
}

impl Display for ProductValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(raw) => write!(f, "product id must be an integer, got `{raw}`"),
            Self::NonPositiveId(id) => write!(f, "product id must be positive, got {id}"),
            Self::InvalidPrice(raw) => write!(f, "price must be a valid number, got `{raw}`"),
            Self::NegativePrice(price) => write!(f, "price must not be negative, got {price}"),
            Self::InvalidStock(raw) => write!(f, "stock must be an integer, got `{raw}`"),
            Self::NegativeStock(stock) => write!(f, "stock must not be negative, got {stock}"),
            Self::AmbiguousVariant(id) => write!(
                f,
                "product {id} cannot carry both an original status and a non-original origin"
            ),
        }
    }
}

impl Error for ProductValidationError {}

/// Mutually exclusive product specializations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductVariant {
    /// Base record with no satellite data.
    #[default]
    Plain,
    /// Original product with a free-text condition/status label.
    Original { status: String },
    /// Non-original product with a free-text provenance label.
    NonOriginal { origin: String },
}

impl ProductVariant {
    /// Returns the stable label used in logs and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Original { .. } => "original",
            Self::NonOriginal { .. } => "non_original",
        }
    }
}

/// Plain key-value shape of a product.
///
/// Variant fields are omitted from serialized output when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Inventory product: base fields plus an optional variant.
///
/// Only `price` and `stock` can change after construction, and only
/// through validating setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    price: f64,
    stock: i64,
    variant: ProductVariant,
}

impl Product {
    /// Creates a plain product.
    ///
    /// # Errors
    /// - Returns `ProductValidationError` when `id`, `price` or `stock` is invalid.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: i64,
    ) -> Result<Self, ProductValidationError> {
        Self::with_variant(id, name, category, price, stock, ProductVariant::Plain)
    }

    /// Creates an original product carrying a status label.
    pub fn original(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: i64,
        status: impl Into<String>,
    ) -> Result<Self, ProductValidationError> {
        let variant = ProductVariant::Original {
            status: status.into(),
        };
        Self::with_variant(id, name, category, price, stock, variant)
    }

    /// Creates a non-original product carrying an origin label.
    pub fn non_original(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: i64,
        origin: impl Into<String>,
    ) -> Result<Self, ProductValidationError> {
        let variant = ProductVariant::NonOriginal {
            origin: origin.into(),
        };
        Self::with_variant(id, name, category, price, stock, variant)
    }

    /// Creates a product with an explicit variant.
    ///
    /// Used by persistence read paths once the satellite lookup resolved
    /// the variant.
    pub fn with_variant(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: i64,
        variant: ProductVariant,
    ) -> Result<Self, ProductValidationError> {
        Ok(Self {
            id: validate_id(id)?,
            name: name.into(),
            category: category.into(),
            price: validate_price(price)?,
            stock: validate_stock(stock)?,
            variant,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Raw stored name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw stored category.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn variant(&self) -> &ProductVariant {
        &self.variant
    }

    /// Status label for original products.
    pub fn status(&self) -> Option<&str> {
        match &self.variant {
            ProductVariant::Original { status } => Some(status),
            _ => None,
        }
    }

    /// Origin label for non-original products.
    pub fn origin(&self) -> Option<&str> {
        match &self.variant {
            ProductVariant::NonOriginal { origin } => Some(origin),
            _ => None,
        }
    }

    /// Replaces price after validation; unchanged on error.
    pub fn set_price(&mut self, price: f64) -> Result<(), ProductValidationError> {
        self.price = validate_price(price)?;
        Ok(())
    }

    /// Replaces stock after validation; unchanged on error.
    pub fn set_stock(&mut self, stock: i64) -> Result<(), ProductValidationError> {
        self.stock = validate_stock(stock)?;
        Ok(())
    }

    /// Name with its first letter upper-cased and the rest lower-cased.
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    /// Category with its first letter upper-cased and the rest lower-cased.
    pub fn display_category(&self) -> String {
        capitalize(&self.category)
    }

    /// Raw key-value record, including the variant field when present.
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            stock: self.stock,
            status: self.status().map(str::to_owned),
            origin: self.origin().map(str::to_owned),
        }
    }

    /// Key-value record with presentation capitalization applied.
    pub fn to_display_record(&self) -> ProductRecord {
        ProductRecord {
            name: self.display_name(),
            category: self.display_category(),
            ..self.to_record()
        }
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.display_name(), self.display_category())?;
        match &self.variant {
            ProductVariant::Plain => Ok(()),
            ProductVariant::Original { status } => write!(f, " - Status: {status}"),
            ProductVariant::NonOriginal { origin } => write!(f, " - Origin: {origin}"),
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let variant = match (record.status, record.origin) {
            (Some(_), Some(_)) => return Err(ProductValidationError::AmbiguousVariant(record.id)),
            (Some(status), None) => ProductVariant::Original { status },
            (None, Some(origin)) => ProductVariant::NonOriginal { origin },
            (None, None) => ProductVariant::Plain,
        };
        Self::with_variant(
            record.id,
            record.name,
            record.category,
            record.price,
            record.stock,
            variant,
        )
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        product.to_record()
    }
}

/// Checks that `id` is a positive integer.
pub fn validate_id(id: ProductId) -> Result<ProductId, ProductValidationError> {
    if id <= 0 {
        return Err(ProductValidationError::NonPositiveId(id));
    }
    Ok(id)
}

/// Checks that `price` is a finite number `>= 0`.
pub fn validate_price(price: f64) -> Result<f64, ProductValidationError> {
    if !price.is_finite() {
        return Err(ProductValidationError::InvalidPrice(price.to_string()));
    }
    if price < 0.0 {
        return Err(ProductValidationError::NegativePrice(price));
    }
    Ok(price)
}

/// Checks that `stock` is `>= 0`.
pub fn validate_stock(stock: i64) -> Result<i64, ProductValidationError> {
    if stock < 0 {
        return Err(ProductValidationError::NegativeStock(stock));
    }
    Ok(stock)
}

/// Parses raw identifier input.
pub fn parse_id(raw: &str) -> Result<ProductId, ProductValidationError> {
    let trimmed = raw.trim();
    let id = trimmed
        .parse::<ProductId>()
        .map_err(|_| ProductValidationError::InvalidId(trimmed.to_string()))?;
    validate_id(id)
}

/// Parses raw price input.
pub fn parse_price(raw: &str) -> Result<f64, ProductValidationError> {
    let trimmed = raw.trim();
    let price = trimmed
        .parse::<f64>()
        .map_err(|_| ProductValidationError::InvalidPrice(trimmed.to_string()))?;
    validate_price(price)
}

/// Parses raw stock input.
pub fn parse_stock(raw: &str) -> Result<i64, ProductValidationError> {
    let trimmed = raw.trim();
    let stock = trimmed
        .parse::<i64>()
        .map_err(|_| ProductValidationError::InvalidStock(trimmed.to_string()))?;
    validate_stock(stock)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
