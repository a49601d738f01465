//! # Error Types
//!
//! Domain-specific error types for paypoint-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  paypoint-core errors (this file)                                │
//! │  ├── PosError         - Register/cart/checkout domain errors     │
//! │  └── ValidationError  - Input-shape validation failures          │
//! │                                                                  │
//! │  Flow: ValidationError → PosError → shell message → operator     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities, state)
//! 3. Errors are enum variants, never String
//! 4. No error is fatal: every variant is recoverable by the caller, and a
//!    failed operation leaves register state unchanged unless its contract
//!    says otherwise

use thiserror::Error;

use crate::checkout::CheckoutState;
use crate::types::ProductId;

// =============================================================================
// Domain Error
// =============================================================================

/// Register domain errors.
///
/// These represent business rule violations during cart mutation, checkout,
/// or catalog lookup. They should be caught and shown to the operator.
#[derive(Debug, Error)]
pub enum PosError {
    /// Quantity is zero or negative.
    #[error("Quantity must be a positive whole number (got {requested})")]
    InvalidQuantity { requested: i64 },

    /// Requested quantity exceeds the currently unreserved stock.
    ///
    /// `available` is what the operator can still add, so the shell can show
    /// the remaining quantity directly.
    #[error("Insufficient stock for {name}: only {available} available, {requested} requested")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// No product with this id in the catalog, or no cart line for it.
    #[error("Product {0} not found")]
    ItemNotFound(ProductId),

    /// Remove quantity exceeds the quantity held in the cart line.
    /// Hard rejection: no partial removal is performed.
    #[error("Cannot remove {requested} x {name}: only {in_cart} in cart, no changes made")]
    ExcessiveRemoval {
        name: String,
        in_cart: i64,
        requested: i64,
    },

    /// Checkout was requested on a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Tendered payment is malformed or negative.
    #[error("Invalid payment amount: {reason}")]
    InvalidAmount { reason: String },

    /// Privileged operation attempted without the privileged role.
    /// Recoverable: the shell offers an elevation path.
    #[error("{action} requires admin privileges")]
    Unauthorized { action: &'static str },

    /// Operation is not legal in the checkout's current state.
    #[error("Checkout is {state:?}, cannot {operation}")]
    InvalidState {
        operation: &'static str,
        state: CheckoutState,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when input doesn't meet shape requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Duplicate value (e.g., duplicate product id at seed time).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PosError.
pub type PosResult<T> = Result<T, PosError>;

// =============================================================================
// Unit Tests
// =============================================================================
