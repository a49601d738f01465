//! # Seed Data
//!
//! The startup product list and demo accounts. The core treats the product
//! list as an opaque seed: it is neither persisted nor reloaded.

use paypoint_core::{Money, PosResult, Product, ProductId, Role};

use crate::auth::User;

/// Seed rows: (id, name, price in cents, stock, category).
const PRODUCTS: &[(u32, &str, i64, i64, &str)] = &[
    (40, "Notebook", 50_000, 8, "General"),
    (45, "Unmaster Lock Padlock", 40_000, 5, "General"),
    (101, "Rice (5lb)", 48_000, 25, "Groceries"),
    (102, "Flour (5lb)", 43_000, 28, "Groceries"),
    (103, "Bread", 60_000, 30, "Groceries"),
    (104, "Milk", 77_000, 15, "Groceries"),
    (105, "Eggs (dozen)", 78_000, 20, "Groceries"),
    (106, "Sugar (5lb)", 40_000, 25, "Groceries"),
    (107, "Pasta", 12_000, 30, "Groceries"),
    (108, "Butter", 25_000, 20, "Groceries"),
    (109, "Canned Beans (1kg)", 32_000, 10, "Groceries"),
    (110, "Honey", 194_000, 8, "Groceries"),
    (201, "Laundry Detergent", 105_000, 14, "Household"),
    (202, "Bleach", 25_000, 16, "Household"),
    (203, "Tissue", 16_000, 36, "Household"),
    (204, "Olive Oil (1L)", 16_500, 24, "Household"),
    (205, "Dishwashing Liquid", 17_500, 16, "Household"),
    (206, "Coconut Oil (1L)", 91_000, 8, "Household"),
    (207, "Desk Fan", 850_000, 12, "Household"),
    (208, "Frying Pan (med)", 556_000, 6, "Household"),
    (209, "Light Bulb", 70_000, 18, "Household"),
    (210, "Fabric Softener", 30_000, 10, "Household"),
    (211, "Toothbrush", 63_000, 12, "Household"),
    (212, "Broom", 60_000, 15, "Household"),
    (213, "Foil Paper", 66_000, 30, "Household"),
    (214, "Rum (750ml)", 170_000, 24, "Household"),
    (215, "Baking Powder (500g)", 14_000, 16, "Household"),
    (301, "Wireless Mouse", 155_000, 11, "Electronics"),
    (302, "Bluetooth Buds", 310_000, 7, "Electronics"),
    (303, "Apple iPad Pro", 3_500_000, 6, "Electronics"),
    (304, "Smart Speaker", 450_000, 11, "Electronics"),
    (305, "USB-C Cable", 200_000, 20, "Electronics"),
];

/// Builds the default product list.
pub fn default_products() -> PosResult<Vec<Product>> {
    PRODUCTS
        .iter()
        .map(|&(id, name, price_cents, stock, category)| {
            Product::new(
                ProductId::new(id),
                name,
                Money::from_cents(price_cents),
                stock,
                category,
            )
        })
        .collect()
}

/// Builds the demo accounts.
pub fn default_users() -> Vec<User> {
    vec![
        User::new("admin", "admin123", Role::Admin),
        User::new("manager", "mgr123", Role::Admin),
        User::new("adowner", "moneyo", Role::Cashier),
        User::new("dburton", "chiching", Role::Cashier),
    ]
}
