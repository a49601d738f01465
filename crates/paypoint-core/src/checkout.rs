//! # Transaction Controller - Checkout State Machine
//!
//! Orchestrates one transaction: line mutation while open, pricing and
//! payment reconciliation during checkout, and commit or reversal of the
//! cart's stock reservations.
//!
//! ## States
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                                                                  │
//! │   OPEN ────begin_checkout────► AWAITING_PAYMENT                  │
//! │    ▲                            │        │  │                    │
//! │    │   failed/emptying removal  │        │  └─tender ≥ total──►  │
//! │    └────────────────────────────┘        │        COMMITTED      │
//! │                                          │        (terminal)     │
//! │         shortfall: retry tender or       │                       │
//! │         remove items (loops back into    └─cancel(confirmed)──►  │
//! │         AWAITING_PAYMENT)                         CANCELLED      │
//! │                                                   (terminal)     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals shown to the operator are recomputed from current cart state at
//! the moment of display; nothing is cached across loop iterations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartUpdate, LineSnapshot};
use crate::catalog::SharedProduct;
use crate::error::{PosError, PosResult};
use crate::money::Money;
use crate::pricing::{PricingPolicy, Totals};
use crate::session::{Principal, RoleGate};
use crate::types::ProductId;
use crate::validation;

// =============================================================================
// Checkout State
// =============================================================================

/// Lifecycle of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    /// Cart is accepting line mutations.
    Open,
    /// Payment is being collected; lines change only through the embedded
    /// shortfall-removal branch.
    AwaitingPayment,
    /// Stock changes finalized, cart cleared. Terminal.
    Committed,
    /// All reserved stock restored, cart cleared. Terminal.
    Cancelled,
}

// =============================================================================
// Outcomes
// =============================================================================

/// Ephemeral record of a settled checkout, for receipt emission only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub amount_tendered: Money,
    pub change: Money,
}

/// Result of tendering a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenderOutcome {
    /// Payment covered the total. The cart is cleared; its stock decrements
    /// became permanent (they were applied at add time and are not applied
    /// again). `lines` carries the frozen line data for the receipt.
    Committed {
        outcome: PaymentOutcome,
        lines: Vec<LineSnapshot>,
    },
    /// Payment fell short. State stays in AwaitingPayment; the caller may
    /// retry with a larger amount, remove items, or cancel.
    Shortfall { totals: Totals, short_by: Money },
}

/// Result of a successful removal during the shortfall branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalOutcome {
    /// Lines remain: pricing recomputed, checkout loops in AwaitingPayment.
    Repriced { update: CartUpdate, totals: Totals },
    /// Removal emptied the cart: the checkout attempt aborts back to Open
    /// (an empty cart cannot await payment).
    CartEmptied { update: CartUpdate },
}

/// Result of a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Confirmed: stock restored, cart cleared, transaction terminal.
    Cancelled,
    /// Not confirmed: nothing changed.
    Declined,
}

// =============================================================================
// Transaction
// =============================================================================

/// One transaction's controller: the cart plus the checkout state machine.
///
/// Every transaction starts with a structurally empty cart; nothing leaks
/// between transactions except catalog stock.
#[derive(Debug)]
pub struct Transaction {
    cart: Cart,
    gate: RoleGate,
    state: CheckoutState,
}

impl Transaction {
    /// Opens a transaction with a fresh cart.
    pub fn new(policy: Arc<dyn PricingPolicy>, gate: RoleGate) -> Self {
        Transaction {
            cart: Cart::new(policy),
            gate,
            state: CheckoutState::Open,
        }
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Read access to the cart (display only; mutation goes through the
    /// controller so state rules hold).
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// True once the transaction reached a terminal state.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            CheckoutState::Committed | CheckoutState::Cancelled
        )
    }

    /// Full pricing quote for the current cart state, recomputed on every
    /// call.
    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    fn require_state(&self, expected: CheckoutState, operation: &'static str) -> PosResult<()> {
        if self.state != expected {
            return Err(PosError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    fn authorize(&self, principal: &Principal, action: &'static str) -> PosResult<()> {
        if !self.gate.is_privileged(principal) {
            return Err(PosError::Unauthorized { action });
        }
        Ok(())
    }

    /// Adds units to the cart. Open state only.
    pub fn add_line(&mut self, product: &SharedProduct, quantity: i64) -> PosResult<CartUpdate> {
        self.require_state(CheckoutState::Open, "add items")?;
        self.cart.add_line(product, quantity)
    }

    /// Removes units from the cart outside checkout. Open state only;
    /// privileged principals only.
    pub fn remove_line(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        principal: &Principal,
    ) -> PosResult<CartUpdate> {
        self.require_state(CheckoutState::Open, "remove items")?;
        self.authorize(principal, "Removing items")?;
        self.cart.remove_line(product_id, quantity)
    }

    /// Enters checkout: Open → AwaitingPayment.
    ///
    /// Fails with `EmptyCart` (no state change) when the cart has no lines.
    /// Returns a fresh quote for the payment summary.
    pub fn begin_checkout(&mut self) -> PosResult<Totals> {
        self.require_state(CheckoutState::Open, "begin checkout")?;
        if self.cart.is_empty() {
            return Err(PosError::EmptyCart);
        }

        self.state = CheckoutState::AwaitingPayment;
        Ok(self.cart.totals())
    }

    /// Reconciles a tendered amount against the total due.
    ///
    /// - Negative amount: `InvalidAmount`, no state change
    /// - `amount >= total`: commit. Change is `amount - total`, the cart is
    ///   cleared, and the transaction is terminal
    /// - `amount < total`: shortfall, state unchanged
    pub fn tender(&mut self, amount: Money) -> PosResult<TenderOutcome> {
        self.require_state(CheckoutState::AwaitingPayment, "tender payment")?;
        validation::validate_tender(amount)?;

        let totals = self.cart.totals();
        if amount < totals.total {
            return Ok(TenderOutcome::Shortfall {
                short_by: totals.total - amount,
                totals,
            });
        }

        let lines = self.cart.snapshot_lines();
        self.cart.clear();
        self.state = CheckoutState::Committed;

        Ok(TenderOutcome::Committed {
            outcome: PaymentOutcome {
                subtotal: totals.subtotal,
                tax: totals.tax,
                discount: totals.discount,
                total: totals.total,
                amount_tendered: amount,
                change: amount - totals.total,
            },
            lines,
        })
    }

    /// The shortfall branch's embedded removal. AwaitingPayment only;
    /// privileged principals only (lack of privilege is recoverable: the
    /// shell may re-authenticate an admin and call again with the elevated
    /// principal, which is in scope for exactly that one call).
    ///
    /// A successful removal reprices and loops in AwaitingPayment, unless it
    /// emptied the cart. A failed removal aborts the checkout attempt back
    /// to Open and surfaces the cart error; the abort itself touches neither
    /// stock nor lines.
    pub fn remove_during_shortfall(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        principal: &Principal,
    ) -> PosResult<RemovalOutcome> {
        self.require_state(CheckoutState::AwaitingPayment, "remove items")?;
        self.authorize(principal, "Removing items during checkout")?;

        match self.cart.remove_line(product_id, quantity) {
            Ok(update) if self.cart.is_empty() => {
                self.state = CheckoutState::Open;
                Ok(RemovalOutcome::CartEmptied { update })
            }
            Ok(update) => Ok(RemovalOutcome::Repriced {
                totals: self.cart.totals(),
                update,
            }),
            Err(err) => {
                self.state = CheckoutState::Open;
                Err(err)
            }
        }
    }

    /// Cancels the transaction. Legal from Open or AwaitingPayment.
    ///
    /// Unconfirmed requests change nothing. Confirmed cancellation restores
    /// every line's reserved stock to the catalog, clears the cart, and ends
    /// the transaction.
    pub fn cancel(&mut self, confirmed: bool) -> PosResult<CancelOutcome> {
        if self.is_settled() {
            return Err(PosError::InvalidState {
                operation: "cancel",
                state: self.state,
            });
        }
        if !confirmed {
            return Ok(CancelOutcome::Declined);
        }

        self.cart.restock_all();
        self.cart.clear();
        self.state = CheckoutState::Cancelled;
        Ok(CancelOutcome::Cancelled)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
