//! # Domain Types
//!
//! Core domain types used throughout PayPoint POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐      │
//! │  │   Product     │   │   ProductId   │   │    TaxRate    │      │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │      │
//! │  │  id           │   │  u32, > 0     │   │  bps (u32)    │      │
//! │  │  name         │   │  immutable    │   │  1000 = 10%   │      │
//! │  │  unit_price   │   └───────────────┘   └───────────────┘      │
//! │  │  stock  ←──── mutated only through cart line operations      │
//! │  │  category     │                                              │
//! │  └───────────────┘                                              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PosResult, ValidationError};
use crate::money::Money;
use crate::validation;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000. The register default of 10% is 1000 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Product Id
// =============================================================================

/// Unique, immutable product identifier. Always a positive integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Creates a product id. Zero ids are rejected at `Product::new`.
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the leading decimal digit of the id.
    ///
    /// Inventory display groups products by this digit (ids are assigned in
    /// numeric families: 1xx groceries, 2xx household, 3xx electronics).
    pub fn leading_digit(&self) -> char {
        let mut n = self.0;
        while n >= 10 {
            n /= 10;
        }
        (b'0' + n as u8) as char
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry available for sale.
///
/// ## Invariants
/// - `id` is positive and immutable
/// - `name` is non-empty
/// - `unit_price` is non-negative
/// - `stock` is never negative; it is mutated only through cart line
///   operations (reservation at add, restock at remove/cancel)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Display name shown to the operator and on the receipt.
    pub name: String,

    /// Price per unit. Live: cart subtotals always read the current value.
    pub unit_price: Money,

    /// Current stock level (units not reserved by the active cart).
    pub stock: i64,

    /// Category tag, searched alongside the name.
    pub category: String,
}

impl Product {
    /// Creates a validated product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        stock: i64,
        category: impl Into<String>,
    ) -> PosResult<Self> {
        if id.get() == 0 {
            return Err(ValidationError::MustBePositive {
                field: "product id".to_string(),
            }
            .into());
        }
        let name = name.into();
        validation::validate_product_name(&name)?;
        validation::validate_unit_price(unit_price)?;
        validation::validate_stock(stock)?;

        Ok(Product {
            id,
            name,
            unit_price,
            stock,
            category: category.into(),
        })
    }

    /// True when remaining stock is at or below the low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
