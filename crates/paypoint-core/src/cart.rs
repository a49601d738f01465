//! # Cart - Stock Reservation Engine
//!
//! The active transaction's working set. Cart mutation and inventory
//! mutation are one logical operation: adding a line reserves stock the
//! instant it happens, removing a line returns it.
//!
//! ## Stock Reservation Invariant
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  For every product, after every successful operation:            │
//! │                                                                  │
//! │    initial_stock == product.stock + quantity held in cart        │
//! │                                                                  │
//! │  add_line(q)    : stock -= q, line += q   (atomic)               │
//! │  remove_line(q) : stock += q, line -= q   (atomic, exact         │
//! │                                            inverse of add)       │
//! │  clear()        : lines dropped, stock untouched (commit path)   │
//! │  restock_all()  : stock returned, lines kept (cancel path,       │
//! │                   always paired with clear())                    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing operation performs zero mutation: every check runs before the
//! first write, inside the product's critical section.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::SharedProduct;
use crate::error::{PosError, PosResult};
use crate::money::Money;
use crate::pricing::{PricingPolicy, Totals};
use crate::types::ProductId;
use crate::validation;

// =============================================================================
// Cart Line
// =============================================================================

/// One entry in the active cart.
///
/// Holds the catalog's product instance (shared, not copied), so price and
/// stock changes are visible immediately on both sides.
///
/// ## Invariant
/// `quantity` is always > 0; a line reaching 0 is removed from the cart.
#[derive(Debug, Clone)]
pub struct CartLine {
    product: SharedProduct,
    /// Cached at construction. Ids are immutable, and the cache lets line
    /// lookup run without taking the product lock.
    product_id: ProductId,
    quantity: i64,
}

impl CartLine {
    fn new(product: SharedProduct, quantity: i64) -> Self {
        let product_id = product.id();
        CartLine {
            product,
            product_id,
            quantity,
        }
    }

    /// The shared product this line reserves stock from.
    pub fn product(&self) -> &SharedProduct {
        &self.product
    }

    /// Product id for this line.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Quantity currently held by this line.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line total at the product's *current* unit price.
    pub fn line_total(&self) -> Money {
        self.product.with(|p| p.unit_price) * self.quantity
    }

    /// Frozen copy of this line for display and receipts.
    pub fn snapshot(&self) -> LineSnapshot {
        self.product.with(|p| LineSnapshot {
            product_id: self.product_id,
            name: p.name.clone(),
            unit_price: p.unit_price,
            quantity: self.quantity,
            line_total: p.unit_price * self.quantity,
        })
    }
}

// =============================================================================
// Mutation Outcome & Snapshots
// =============================================================================

/// Outcome of a successful cart mutation, for the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUpdate {
    pub product_id: ProductId,
    pub name: String,
    /// Line quantity after the mutation (0 when the line was removed).
    pub line_quantity: i64,
    /// Product stock after the mutation.
    pub stock_remaining: i64,
    /// Low-stock signal: stock at or below the threshold after the mutation.
    pub low_stock: bool,
}

/// Frozen line data, captured because commit clears the cart before the
/// receipt is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The active transaction's cart: insertion-ordered lines plus the applied
/// pricing policy.
///
/// Scoped to one transaction. A new transaction always starts from a
/// structurally empty cart; catalog stock is the only state that carries
/// across.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    policy: Arc<dyn PricingPolicy>,
    opened_at: DateTime<Utc>,
}

impl Cart {
    /// Opens an empty cart under the given pricing policy.
    pub fn new(policy: Arc<dyn PricingPolicy>) -> Self {
        Cart {
            lines: Vec::new(),
            policy,
            opened_at: Utc::now(),
        }
    }

    /// Adds `quantity` units of a product, reserving them from stock.
    ///
    /// ## Behavior
    /// - `InvalidQuantity` when quantity is not positive
    /// - `InsufficientStock` when quantity exceeds the currently unreserved
    ///   stock; units already reserved by this cart's line do not count
    ///   against the request
    /// - Otherwise decrements stock and creates or bumps the line; the check
    ///   and the decrement share one critical section, so failure means zero
    ///   mutation
    pub fn add_line(&mut self, product: &SharedProduct, quantity: i64) -> PosResult<CartUpdate> {
        validation::validate_quantity(quantity)?;

        let product_id = product.id();
        let (name, stock_remaining, low_stock) = product.with_mut(|p| {
            if quantity > p.stock {
                return Err(PosError::InsufficientStock {
                    name: p.name.clone(),
                    available: p.stock,
                    requested: quantity,
                });
            }
            p.stock -= quantity;
            Ok((p.name.clone(), p.stock, p.is_low_stock()))
        })?;

        let line_quantity = match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => {
                line.quantity += quantity;
                line.quantity
            }
            None => {
                self.lines.push(CartLine::new(product.clone(), quantity));
                quantity
            }
        };

        Ok(CartUpdate {
            product_id,
            name,
            line_quantity,
            stock_remaining,
            low_stock,
        })
    }

    /// Removes `quantity` units of a product, returning them to stock.
    ///
    /// ## Behavior
    /// - `InvalidQuantity` when quantity is not positive
    /// - `ItemNotFound` when no line exists for the id
    /// - `ExcessiveRemoval` when quantity exceeds the line's quantity: a
    ///   hard rejection, no partial removal, no state change at all
    /// - Otherwise increments stock, decrements the line, and deletes the
    ///   line when it reaches 0
    ///
    /// Exact inverse of [`Cart::add_line`]: an add followed immediately by a
    /// remove of the same quantity restores the pre-add state.
    pub fn remove_line(&mut self, product_id: ProductId, quantity: i64) -> PosResult<CartUpdate> {
        validation::validate_quantity(quantity)?;

        let index = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)
            .ok_or(PosError::ItemNotFound(product_id))?;

        let line = &mut self.lines[index];
        if quantity > line.quantity {
            return Err(PosError::ExcessiveRemoval {
                name: line.product.with(|p| p.name.clone()),
                in_cart: line.quantity,
                requested: quantity,
            });
        }

        let (name, stock_remaining, low_stock) = line.product.with_mut(|p| {
            p.stock += quantity;
            (p.name.clone(), p.stock, p.is_low_stock())
        });
        line.quantity -= quantity;
        let line_quantity = line.quantity;
        if line_quantity == 0 {
            self.lines.remove(index);
        }

        Ok(CartUpdate {
            product_id,
            name,
            line_quantity,
            stock_remaining,
            low_stock,
        })
    }

    /// Returns every line's reserved quantity to its product.
    ///
    /// Lines are left in place; cancellation pairs this with [`Cart::clear`].
    pub fn restock_all(&self) {
        for line in &self.lines {
            line.product.with_mut(|p| p.stock += line.quantity);
        }
    }

    /// Empties the cart without touching stock.
    ///
    /// This is a destructive reset: used after a committed sale (where the
    /// stock decrements are intentional and permanent) or as initialization.
    /// Cancellation must call [`Cart::restock_all`] first.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.opened_at = Utc::now();
    }

    /// Subtotal over all lines at each product's *current* unit price.
    ///
    /// A price change mid-transaction is reflected immediately.
    pub fn calculate_subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }

    /// Full pricing quote for the current cart state. Never cached.
    pub fn totals(&self) -> Totals {
        self.policy.quote(self.calculate_subtotal())
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Frozen copies of all lines, in insertion order.
    pub fn snapshot_lines(&self) -> Vec<LineSnapshot> {
        self.lines.iter().map(CartLine::snapshot).collect()
    }

    /// When this cart was opened (or last reset).
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::StandardPricing;
    use crate::types::{Product, TaxRate};

    fn test_product(id: u32, price_cents: i64, stock: i64) -> SharedProduct {
        SharedProduct::new(
            Product::new(
                ProductId::new(id),
                format!("Product {id}"),
                Money::from_cents(price_cents),
                stock,
                "Groceries",
            )
            .unwrap(),
        )
    }

    fn test_cart() -> Cart {
        Cart::new(Arc::new(StandardPricing::new(TaxRate::from_bps(1000))))
    }

    #[test]
    fn test_add_reserves_stock() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);

        let update = cart.add_line(&rice, 2).unwrap();
        assert_eq!(update.line_quantity, 2);
        assert_eq!(update.stock_remaining, 23);
        assert!(!update.low_stock);

        assert_eq!(cart.len(), 1);
        assert_eq!(rice.with(|p| p.stock), 23);
        assert_eq!(cart.calculate_subtotal().cents(), 96_000);
    }

    #[test]
    fn test_add_same_product_bumps_existing_line() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);

        cart.add_line(&rice, 2).unwrap();
        let update = cart.add_line(&rice, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(update.line_quantity, 5);
        assert_eq!(rice.with(|p| p.stock), 20);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);

        for quantity in [0, -1, -20] {
            let err = cart.add_line(&rice, quantity).unwrap_err();
            assert!(matches!(err, PosError::InvalidQuantity { .. }));
        }

        // Zero mutation on failure.
        assert!(cart.is_empty());
        assert_eq!(rice.with(|p| p.stock), 25);
    }

    #[test]
    fn test_add_insufficient_stock_new_line() {
        let mut cart = test_cart();
        let padlock = test_product(45, 40_000, 5);

        let err = cart.add_line(&padlock, 6).unwrap_err();
        assert!(matches!(
            err,
            PosError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));
        assert!(cart.is_empty());
        assert_eq!(padlock.with(|p| p.stock), 5);
    }

    /// Stock 25: add 20 (stock 5, low-stock fires), add 10 fails showing 5
    /// available, remove 20 restores everything.
    #[test]
    fn test_reservation_scenario() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);

        let update = cart.add_line(&rice, 20).unwrap();
        assert_eq!(update.stock_remaining, 5);
        assert!(update.low_stock);

        let err = cart.add_line(&rice, 10).unwrap_err();
        match err {
            PosError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                // The 20 already reserved do not count against the request;
                // only the unreserved 5 do.
                assert_eq!(available, 5);
                assert_eq!(requested, 10);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert_eq!(rice.with(|p| p.stock), 5);
        assert_eq!(cart.lines()[0].quantity(), 20);

        let update = cart.remove_line(ProductId::new(101), 20).unwrap();
        assert_eq!(update.line_quantity, 0);
        assert_eq!(update.stock_remaining, 25);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_product() {
        let mut cart = test_cart();
        let err = cart.remove_line(ProductId::new(999), 1).unwrap_err();
        assert!(matches!(err, PosError::ItemNotFound(_)));
    }

    #[test]
    fn test_remove_excessive_makes_no_changes() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);
        cart.add_line(&rice, 2).unwrap();

        let err = cart.remove_line(ProductId::new(101), 4).unwrap_err();
        assert!(matches!(
            err,
            PosError::ExcessiveRemoval {
                in_cart: 2,
                requested: 4,
                ..
            }
        ));

        // Hard rejection: neither stock nor line moved.
        assert_eq!(rice.with(|p| p.stock), 23);
        assert_eq!(cart.lines()[0].quantity(), 2);
    }

    #[test]
    fn test_remove_partial_keeps_line() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);
        cart.add_line(&rice, 5).unwrap();

        let update = cart.remove_line(ProductId::new(101), 2).unwrap();
        assert_eq!(update.line_quantity, 3);
        assert_eq!(rice.with(|p| p.stock), 22);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_to_zero_drops_line() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);
        cart.add_line(&rice, 5).unwrap();

        cart.remove_line(ProductId::new(101), 5).unwrap();
        assert!(cart.is_empty());
        // No residual zero-quantity line.
        assert_eq!(cart.lines().len(), 0);
        assert_eq!(rice.with(|p| p.stock), 25);
    }

    #[test]
    fn test_round_trip_restores_pre_add_state() {
        let mut cart = test_cart();
        let bread = test_product(103, 60_000, 30);

        cart.add_line(&bread, 7).unwrap();
        cart.remove_line(ProductId::new(103), 7).unwrap();

        assert!(cart.is_empty());
        assert_eq!(bread.with(|p| p.stock), 30);
    }

    #[test]
    fn test_low_stock_signal_on_remove() {
        let mut cart = test_cart();
        let fan = test_product(207, 850_000, 8);

        // Reserve down to 2, then return one: stock 3 is still low.
        cart.add_line(&fan, 6).unwrap();
        let update = cart.remove_line(ProductId::new(207), 1).unwrap();
        assert_eq!(update.stock_remaining, 3);
        assert!(update.low_stock);

        let update = cart.remove_line(ProductId::new(207), 5).unwrap();
        assert_eq!(update.stock_remaining, 8);
        assert!(!update.low_stock);
    }

    #[test]
    fn test_clear_does_not_touch_stock() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);
        cart.add_line(&rice, 5).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        // Commit semantics: the reservation stays applied.
        assert_eq!(rice.with(|p| p.stock), 20);
    }

    #[test]
    fn test_restock_all_then_clear_restores_stock() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);
        let bread = test_product(103, 60_000, 30);
        cart.add_line(&rice, 5).unwrap();
        cart.add_line(&bread, 2).unwrap();

        cart.restock_all();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(rice.with(|p| p.stock), 25);
        assert_eq!(bread.with(|p| p.stock), 30);
    }

    #[test]
    fn test_subtotal_follows_current_price() {
        let mut cart = test_cart();
        let honey = test_product(110, 194_000, 8);
        cart.add_line(&honey, 2).unwrap();
        assert_eq!(cart.calculate_subtotal().cents(), 388_000);

        // Price change mid-transaction is reflected immediately; nothing is
        // frozen at add time.
        honey.with_mut(|p| p.unit_price = Money::from_cents(200_000));
        assert_eq!(cart.calculate_subtotal().cents(), 400_000);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);
        let bread = test_product(103, 60_000, 30);
        let milk = test_product(104, 77_000, 15);

        cart.add_line(&bread, 1).unwrap();
        cart.add_line(&rice, 1).unwrap();
        cart.add_line(&milk, 1).unwrap();
        cart.add_line(&bread, 1).unwrap(); // bump, not reorder

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.product_id().get()).collect();
        assert_eq!(ids, vec![103, 101, 104]);
    }

    #[test]
    fn test_snapshot_lines() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);
        cart.add_line(&rice, 2).unwrap();

        let snapshots = cart.snapshot_lines();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].quantity, 2);
        assert_eq!(snapshots[0].line_total.cents(), 96_000);
    }

    /// The display layer consumes mutation outcomes as data; they must
    /// survive serialization intact.
    #[test]
    fn test_cart_update_round_trips_as_json() {
        let mut cart = test_cart();
        let rice = test_product(101, 48_000, 25);
        let update = cart.add_line(&rice, 21).unwrap();
        assert!(update.low_stock);

        let json = serde_json::to_string(&update).unwrap();
        let back: CartUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, update);
    }
}

// =============================================================================
// Property Tests
// =============================================================================
