//! # paypoint-core: Pure Business Logic for PayPoint POS
//!
//! This crate is the heart of the register. It contains all business logic
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                    PayPoint POS Architecture                     │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                  apps/terminal (shell)                     │  │
//! │  │   login ──► menus ──► payment prompt ──► receipt text      │  │
//! │  └───────────────────────────┬────────────────────────────────┘  │
//! │                              │                                   │
//! │  ┌───────────────────────────▼────────────────────────────────┐  │
//! │  │             ★ paypoint-core (THIS CRATE) ★                 │  │
//! │  │                                                            │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────┐ ┌──────────┐ ┌────────┐  │  │
//! │  │  │ catalog │ │ pricing │ │ cart │ │ checkout │ │session │  │  │
//! │  │  │ Product │ │ Policy  │ │ add/ │ │ state    │ │ Role   │  │  │
//! │  │  │ search  │ │ Totals  │ │remove│ │ machine  │ │ Gate   │  │  │
//! │  │  └─────────┘ └─────────┘ └──────┘ └──────────┘ └────────┘  │  │
//! │  │                                                            │  │
//! │  │  NO I/O • NO TERMINAL • NO NETWORK • PURE FUNCTIONS        │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input shape validation
//! - [`catalog`] - Product catalog and shared product handles
//! - [`pricing`] - Pricing policy strategy (tax, threshold discount)
//! - [`cart`] - Stock reservation engine
//! - [`checkout`] - Transaction controller state machine
//! - [`session`] - Role gate for privileged operations
//! - [`register`] - Process-scoped context object
//!
//! ## Design Principles
//!
//! 1. **Pure logic**: deterministic, synchronous, single register
//! 2. **No I/O**: terminal, file system, and network access are FORBIDDEN here
//! 3. **Integer money**: all monetary values are cents (i64)
//! 4. **Explicit errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use paypoint_core::{Catalog, Money, Product, ProductId, Register, TaxRate};
//! use paypoint_core::checkout::TenderOutcome;
//!
//! let catalog = Catalog::seed([Product::new(
//!     ProductId::new(101),
//!     "Rice (5lb)",
//!     Money::from_cents(48_000),
//!     25,
//!     "Groceries",
//! )?])?;
//! let register = Register::with_standard_pricing(catalog, TaxRate::from_bps(1000));
//!
//! let rice = register.catalog().find(ProductId::new(101))?;
//! let mut tx = register.begin_transaction();
//! tx.add_line(&rice, 2)?;
//! tx.begin_checkout()?;
//!
//! match tx.tender(Money::from_cents(110_000))? {
//!     TenderOutcome::Committed { outcome, .. } => {
//!         assert_eq!(outcome.change.cents(), 4_400);
//!     }
//!     TenderOutcome::Shortfall { short_by, .. } => {
//!         println!("need {short_by} more");
//!     }
//! }
//! # Ok::<(), paypoint_core::PosError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod register;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartUpdate, LineSnapshot};
pub use catalog::{Catalog, SharedProduct};
pub use checkout::{
    CancelOutcome, CheckoutState, PaymentOutcome, RemovalOutcome, TenderOutcome, Transaction,
};
pub use error::{PosError, PosResult, ValidationError};
pub use money::Money;
pub use pricing::{PricingPolicy, StandardPricing, Totals};
pub use register::Register;
pub use session::{Principal, Role, RoleGate};
pub use types::{Product, ProductId, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level at or below which a mutation reports the low-stock signal.
///
/// The signal is an observable side effect for the display layer, not core
/// state: the cart reports it on every successful add/remove.
pub const LOW_STOCK_THRESHOLD: i64 = 5;
