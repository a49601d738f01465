//! # Session / Role Gate
//!
//! Authorization check gating privileged operations: cart-line removal
//! outside checkout and the checkout shortfall removal branch.
//!
//! Authentication itself (credential verification, attempt lockout) is an
//! external collaborator. The core only ever receives an already
//! authenticated principal and asks one question about it.

use serde::{Deserialize, Serialize};

// =============================================================================
// Role
// =============================================================================

/// The closed set of register roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Elevated role: may remove cart lines and override during checkout.
    Admin,
    /// Standard operator role.
    Cashier,
}

// =============================================================================
// Principal
// =============================================================================

/// An authenticated principal: who is driving the register right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    username: String,
    role: Role,
}

impl Principal {
    /// Creates a principal from an already-verified identity.
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Principal {
            username: username.into(),
            role,
        }
    }

    /// The principal's username (receipt display).
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The principal's role.
    pub fn role(&self) -> Role {
        self.role
    }
}

// =============================================================================
// Role Gate
// =============================================================================

/// Single-predicate authorization gate.
///
/// No mutation, no credential knowledge: just "does this principal hold the
/// privileged role".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    privileged: Role,
}

impl RoleGate {
    /// Creates a gate with the given privileged role.
    pub const fn new(privileged: Role) -> Self {
        RoleGate { privileged }
    }

    /// True iff the principal's role equals the privileged role.
    pub fn is_privileged(&self, principal: &Principal) -> bool {
        principal.role() == self.privileged
    }
}

impl Default for RoleGate {
    fn default() -> Self {
        RoleGate::new(Role::Admin)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_is_privileged() {
        let gate = RoleGate::default();
        let admin = Principal::new("manager", Role::Admin);
        assert!(gate.is_privileged(&admin));
    }

    #[test]
    fn test_cashier_is_not_privileged() {
        let gate = RoleGate::default();
        let cashier = Principal::new("dburton", Role::Cashier);
        assert!(!gate.is_privileged(&cashier));
    }

    #[test]
    fn test_gate_follows_configured_role() {
        let gate = RoleGate::new(Role::Cashier);
        assert!(gate.is_privileged(&Principal::new("dburton", Role::Cashier)));
        assert!(!gate.is_privileged(&Principal::new("admin", Role::Admin)));
    }
}
