//! # Validation Module
//!
//! Input validation for PayPoint POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Shell (terminal)                                       │
//! │  ├── Numeric parsing (ids, quantities, amounts)                  │
//! │  └── Immediate re-prompt on malformed input                      │
//! │           │                                                      │
//! │           ▼                                                      │
//! │  Layer 2: THIS MODULE - shape validation                         │
//! │           │                                                      │
//! │           ▼                                                      │
//! │  Layer 3: Business rules (stock checks, state checks)            │
//! │                                                                  │
//! │  Defense in depth: each layer catches different errors           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{PosError, PosResult, ValidationError};
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0); applies to add and remove alike
pub fn validate_quantity(quantity: i64) -> PosResult<()> {
    if quantity <= 0 {
        return Err(PosError::InvalidQuantity {
            requested: quantity,
        });
    }

    Ok(())
}

/// Validates a tendered payment amount.
///
/// ## Rules
/// - Must not be negative; zero is legal (a zero-total cart exists only in
///   theory, but the contract is non-negative, not positive)
pub fn validate_tender(amount: Money) -> PosResult<()> {
    if amount.is_negative() {
        return Err(PosError::InvalidAmount {
            reason: format!("{amount} is negative"),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (free items)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock count.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(matches!(
            validate_quantity(0),
            Err(PosError::InvalidQuantity { requested: 0 })
        ));
        assert!(matches!(
            validate_quantity(-3),
            Err(PosError::InvalidQuantity { requested: -3 })
        ));
    }

    #[test]
    fn test_validate_tender() {
        assert!(validate_tender(Money::zero()).is_ok());
        assert!(validate_tender(Money::from_cents(630_000)).is_ok());
        assert!(matches!(
            validate_tender(Money::from_cents(-1)),
            Err(PosError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_cents(48_000)).is_ok());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(25).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Rice (5lb)").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  rice  ").unwrap(), "rice");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"A".repeat(200)).is_err());
    }
}
