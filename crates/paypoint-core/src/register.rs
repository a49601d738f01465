//! # Register
//!
//! The process-scoped context object: one catalog, one pricing policy, one
//! role gate, built explicitly at startup from seed data and configuration.
//! No hidden globals; single-instance semantics come from constructing
//! exactly one `Register` and passing it around.
//!
//! Catalog stock is the only state shared across transactions. Each
//! transaction gets a fresh cart via [`Register::begin_transaction`].

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::checkout::Transaction;
use crate::pricing::{PricingPolicy, StandardPricing};
use crate::session::RoleGate;
use crate::types::TaxRate;

/// Process-scoped register context.
#[derive(Debug)]
pub struct Register {
    catalog: Catalog,
    policy: Arc<dyn PricingPolicy>,
    gate: RoleGate,
}

impl Register {
    /// Creates a register from an explicit catalog, policy, and gate.
    pub fn new(catalog: Catalog, policy: Arc<dyn PricingPolicy>, gate: RoleGate) -> Self {
        Register {
            catalog,
            policy,
            gate,
        }
    }

    /// Creates a register with the standard pricing policy at the configured
    /// tax rate and the default (admin-privileged) gate.
    pub fn with_standard_pricing(catalog: Catalog, tax_rate: TaxRate) -> Self {
        Register::new(
            catalog,
            Arc::new(StandardPricing::new(tax_rate)),
            RoleGate::default(),
        )
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The role gate consulted for privileged operations.
    pub fn gate(&self) -> &RoleGate {
        &self.gate
    }

    /// Opens a new transaction with a structurally empty cart.
    pub fn begin_transaction(&self) -> Transaction {
        Transaction::new(Arc::clone(&self.policy), self.gate)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
