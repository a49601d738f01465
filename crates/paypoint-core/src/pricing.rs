//! # Pricing Policy
//!
//! Pure pricing computation: tax, threshold discount, total.
//!
//! Policies are a strategy seam. The cart and checkout controller only know
//! the [`PricingPolicy`] trait, so a different discount scheme slots in
//! without touching either.
//!
//! Whenever a total is shown anywhere (cart view, checkout view, receipt)
//! the same fixed order applies: subtotal → tax → discount → total. The
//! provided [`PricingPolicy::quote`] method is that order; call sites use it
//! rather than re-deriving pieces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Policy Constants
// =============================================================================

/// Subtotal at or above which the standard discount applies.
pub const DISCOUNT_THRESHOLD: Money = Money::from_cents(500_000);

/// Standard discount rate in basis points (500 = 5%).
pub const DISCOUNT_BPS: u32 = 500;

// =============================================================================
// Totals
// =============================================================================

/// One pricing quote, computed in the fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Pricing Policy Trait
// =============================================================================

/// Pricing computation strategy.
///
/// All methods are pure, deterministic, and side-effect free.
pub trait PricingPolicy: fmt::Debug + Send + Sync {
    /// Tax due on a subtotal.
    fn tax(&self, subtotal: Money) -> Money;

    /// Discount granted on a subtotal.
    fn discount(&self, subtotal: Money) -> Money;

    /// Total due: `subtotal + tax - discount`.
    fn total(&self, subtotal: Money, tax: Money, discount: Money) -> Money {
        subtotal + tax - discount
    }

    /// Computes the full quote in the fixed order
    /// subtotal → tax → discount → total.
    fn quote(&self, subtotal: Money) -> Totals {
        let tax = self.tax(subtotal);
        let discount = self.discount(subtotal);
        let total = self.total(subtotal, tax, discount);
        Totals {
            subtotal,
            tax,
            discount,
            total,
        }
    }
}

// =============================================================================
// Standard Pricing
// =============================================================================

/// The default register policy: configured tax rate, flat 5% discount once
/// the subtotal reaches $5000.00, zero below the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardPricing {
    tax_rate: TaxRate,
}

impl StandardPricing {
    /// Creates the standard policy with a configured tax rate.
    pub const fn new(tax_rate: TaxRate) -> Self {
        StandardPricing { tax_rate }
    }

    /// Returns the configured tax rate.
    pub const fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }
}

impl PricingPolicy for StandardPricing {
    fn tax(&self, subtotal: Money) -> Money {
        subtotal.calculate_tax(self.tax_rate)
    }

    fn discount(&self, subtotal: Money) -> Money {
        if subtotal >= DISCOUNT_THRESHOLD {
            subtotal.percentage(DISCOUNT_BPS)
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
