//! # Catalog
//!
//! Owns the set of products and their live stock counters for the process
//! lifetime.
//!
//! ## Ownership Model
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Catalog ── BTreeMap<ProductId, SharedProduct>                   │
//! │                            │                                     │
//! │                            │ clone of the Arc, same instance     │
//! │                            ▼                                     │
//! │  Cart line ── SharedProduct ── Arc<Mutex<Product>>               │
//! │                                                                  │
//! │  The cart never copies product data. Stock and price changes     │
//! │  are visible immediately to both the cart view and the           │
//! │  inventory view.                                                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog does not intermediate stock mutation: cart operations hold
//! direct `SharedProduct` references and mutate through them.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::{PosError, PosResult, ValidationError};
use crate::types::{Product, ProductId};

// =============================================================================
// Shared Product Handle
// =============================================================================

/// Shared handle to a catalog-owned product.
///
/// ## Thread Safety
/// Wraps `Arc<Mutex<Product>>`:
/// - `Arc`: shared ownership between the catalog and cart lines
/// - `Mutex`: the single critical section around each stock check+mutate,
///   so no reader ever observes a half-applied reservation
///
/// The register is single-threaded today; the lock keeps the atomicity
/// contract explicit rather than implicit.
#[derive(Debug, Clone)]
pub struct SharedProduct(Arc<Mutex<Product>>);

impl SharedProduct {
    /// Wraps a product in a shared handle.
    pub fn new(product: Product) -> Self {
        SharedProduct(Arc::new(Mutex::new(product)))
    }

    /// Returns the product id. Ids are immutable, so this is always stable.
    pub fn id(&self) -> ProductId {
        self.with(|p| p.id)
    }

    /// Executes a function with read access to the product.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let price = product.with(|p| p.unit_price);
    /// ```
    pub fn with<R>(&self, f: impl FnOnce(&Product) -> R) -> R {
        let guard = self.0.lock().expect("product mutex poisoned");
        f(&guard)
    }

    /// Executes a function with write access to the product.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// product.with_mut(|p| p.stock += quantity);
    /// ```
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Product) -> R) -> R {
        let mut guard = self.0.lock().expect("product mutex poisoned");
        f(&mut guard)
    }

    /// Returns a point-in-time copy for display.
    pub fn snapshot(&self) -> Product {
        self.with(Product::clone)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The product catalog. Iteration order is ascending product id.
///
/// Products are created at initialization and never deleted during a run.
#[derive(Debug, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, SharedProduct>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog {
            products: BTreeMap::new(),
        }
    }

    /// Builds a catalog from a startup product list.
    ///
    /// The seed is opaque to the core: it is neither persisted nor reloaded.
    pub fn seed(products: impl IntoIterator<Item = Product>) -> PosResult<Self> {
        let mut catalog = Catalog::new();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Adds a product to the catalog. Duplicate ids are rejected.
    pub fn insert(&mut self, product: Product) -> PosResult<SharedProduct> {
        let id = product.id;
        if self.products.contains_key(&id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: id.to_string(),
            }
            .into());
        }

        let shared = SharedProduct::new(product);
        self.products.insert(id, shared.clone());
        Ok(shared)
    }

    /// Exact lookup by id.
    pub fn find(&self, id: ProductId) -> PosResult<SharedProduct> {
        self.products
            .get(&id)
            .cloned()
            .ok_or(PosError::ItemNotFound(id))
    }

    /// Case-insensitive substring search against name OR category.
    ///
    /// Results come back in catalog iteration order. No match yields an
    /// empty vec, not an error. An empty query matches every product.
    pub fn search(&self, query: &str) -> Vec<SharedProduct> {
        let query = query.trim().to_lowercase();

        self.products
            .values()
            .filter(|product| {
                product.with(|p| {
                    p.name.to_lowercase().contains(&query)
                        || p.category.to_lowercase().contains(&query)
                })
            })
            .cloned()
            .collect()
    }

    /// Groups products by the leading decimal digit of their id, sorted by
    /// key. A pure projection for inventory display; mutates nothing.
    pub fn group_by_leading_digit(&self) -> BTreeMap<char, Vec<SharedProduct>> {
        let mut groups: BTreeMap<char, Vec<SharedProduct>> = BTreeMap::new();
        for product in self.products.values() {
            groups
                .entry(product.id().leading_digit())
                .or_default()
                .push(product.clone());
        }
        groups
    }

    /// Iterates products in catalog order.
    pub fn products(&self) -> impl Iterator<Item = &SharedProduct> {
        self.products.values()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: u32, name: &str, category: &str) -> Product {
        Product::new(
            ProductId::new(id),
            name,
            Money::from_cents(48_000),
            25,
            category,
        )
        .unwrap()
    }

    fn sample_catalog() -> Catalog {
        Catalog::seed([
            product(40, "Notebook", "General"),
            product(101, "Rice (5lb)", "Groceries"),
            product(103, "Bread", "Groceries"),
            product(201, "Laundry Detergent", "Household"),
            product(301, "Wireless Mouse", "Electronics"),
        ])
        .unwrap()
    }

    #[test]
    fn test_find_hit_and_miss() {
        let catalog = sample_catalog();

        let rice = catalog.find(ProductId::new(101)).unwrap();
        assert_eq!(rice.with(|p| p.name.clone()), "Rice (5lb)");

        let missing = catalog.find(ProductId::new(999));
        assert!(matches!(missing, Err(PosError::ItemNotFound(id)) if id == ProductId::new(999)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = sample_catalog();
        let duplicate = catalog.insert(product(101, "Rice Again", "Groceries"));
        assert!(matches!(duplicate, Err(PosError::Validation(_))));
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_search_matches_name_case_insensitive() {
        let catalog = sample_catalog();
        let results = catalog.search("RICE");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), ProductId::new(101));
    }

    #[test]
    fn test_search_matches_category() {
        let catalog = sample_catalog();
        let results = catalog.search("groceries");
        let ids: Vec<u32> = results.iter().map(|p| p.id().get()).collect();
        // Catalog iteration order: ascending id.
        assert_eq!(ids, vec![101, 103]);
    }

    #[test]
    fn test_search_no_match_is_empty_not_error() {
        let catalog = sample_catalog();
        assert!(catalog.search("plutonium").is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let catalog = sample_catalog();
        assert_eq!(catalog.search("  ").len(), 5);
    }

    #[test]
    fn test_group_by_leading_digit() {
        let catalog = sample_catalog();
        let groups = catalog.group_by_leading_digit();

        let keys: Vec<char> = groups.keys().copied().collect();
        assert_eq!(keys, vec!['1', '2', '3', '4']);
        assert_eq!(groups[&'1'].len(), 2); // 101, 103
        assert_eq!(groups[&'4'].len(), 1); // 40
    }

    #[test]
    fn test_handles_share_one_instance() {
        let catalog = sample_catalog();
        let a = catalog.find(ProductId::new(101)).unwrap();
        let b = catalog.find(ProductId::new(101)).unwrap();

        a.with_mut(|p| p.stock -= 20);
        assert_eq!(b.with(|p| p.stock), 5);
    }
}
