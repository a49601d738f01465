//! # Receipt & Display Rendering
//!
//! Text rendering for cart views, payment summaries, inventory rows, and the
//! final receipt. Pure formatting over core snapshot types; nothing here
//! touches register state.

use std::io::{self, Write};

use chrono::Utc;
use uuid::Uuid;

use paypoint_core::{LineSnapshot, PaymentOutcome, Product, Totals};

use crate::config::StoreConfig;

const RECEIPT_WIDTH: usize = 45;

/// Generates a unique order id: timestamp plus a short random suffix.
pub fn order_id() -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{timestamp}_{}", &suffix[..5])
}

/// One inventory row, as shown in search results and the inventory view.
pub fn format_product(product: &Product, config: &StoreConfig) -> String {
    format!(
        "{}. {}   {} || Stock: {} | Category: {}",
        product.id,
        product.name,
        config.format_money(product.unit_price),
        product.stock,
        product.category
    )
}

fn write_totals(
    out: &mut impl Write,
    config: &StoreConfig,
    totals: &Totals,
    total_label: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<35} {}",
        "Subtotal:",
        config.format_money(totals.subtotal)
    )?;
    writeln!(
        out,
        "{:<35} {}",
        format!("Tax ({:.0}%):", config.tax_rate().percentage()),
        config.format_money(totals.tax)
    )?;
    if totals.discount.is_positive() {
        writeln!(
            out,
            "{:<35}-{}",
            "Discount:",
            config.format_money(totals.discount)
        )?;
    }
    writeln!(
        out,
        "{:<35} {}",
        total_label,
        config.format_money(totals.total)
    )?;
    Ok(())
}

/// The cart view: line items plus a fresh quote.
pub fn write_cart_view(
    out: &mut impl Write,
    config: &StoreConfig,
    lines: &[LineSnapshot],
    totals: &Totals,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{:^40}", "------ Current Cart Items ------")?;
    writeln!(out)?;
    for line in lines {
        writeln!(
            out,
            "{} x {} @ {}   {}",
            line.quantity,
            line.name,
            config.format_money(line.unit_price),
            config.format_money(line.line_total)
        )?;
    }
    writeln!(out)?;
    write_totals(out, config, totals, "Total Payment Due:")
}

/// The checkout payment summary.
pub fn write_payment_summary(
    out: &mut impl Write,
    config: &StoreConfig,
    totals: &Totals,
) -> io::Result<()> {
    writeln!(out, "{:^40}", "====== Payment Summary ======")?;
    write_totals(out, config, totals, "TOTAL DUE:")
}

/// The final receipt for a committed sale.
pub fn write_receipt(
    out: &mut impl Write,
    config: &StoreConfig,
    cashier: &str,
    outcome: &PaymentOutcome,
    lines: &[LineSnapshot],
) -> io::Result<()> {
    let rule = "=".repeat(RECEIPT_WIDTH);
    let thin_rule = "-".repeat(RECEIPT_WIDTH);

    writeln!(out, "\n{rule}")?;
    writeln!(out, "{:^width$}", config.store_name, width = RECEIPT_WIDTH)?;
    writeln!(out, "{:^width$}", config.store_address, width = RECEIPT_WIDTH)?;
    writeln!(out, "{:^width$}", config.telephone, width = RECEIPT_WIDTH)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Order ID: {}", order_id())?;
    writeln!(out, "Date: {}", Utc::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Cashier:  {cashier}")?;
    writeln!(out, "{thin_rule}")?;

    for line in lines {
        writeln!(
            out,
            "{} @ {} {:<20} {}",
            line.quantity,
            config.format_money(line.unit_price),
            line.name,
            config.format_money(line.line_total)
        )?;
    }

    writeln!(out, "{thin_rule}")?;
    writeln!(out, "Subtotal: {}", config.format_money(outcome.subtotal))?;
    writeln!(
        out,
        "Tax ({:.0}%): {}",
        config.tax_rate().percentage(),
        config.format_money(outcome.tax)
    )?;
    if outcome.discount.is_positive() {
        writeln!(out, "Discount: -{}", config.format_money(outcome.discount))?;
    }
    writeln!(
        out,
        "Amount Paid: {}",
        config.format_money(outcome.amount_tendered)
    )?;
    writeln!(out, "Change: {}", config.format_money(outcome.change))?;
    writeln!(out)?;
    writeln!(out, "TOTAL DUE: {}", config.format_money(outcome.total))?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{:^width$}", "Thank you for shopping with us!", width = RECEIPT_WIDTH)?;
    writeln!(out, "{rule}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paypoint_core::{Money, ProductId};

    fn snapshot_line() -> LineSnapshot {
        LineSnapshot {
            product_id: ProductId::new(101),
            name: "Rice (5lb)".to_string(),
            unit_price: Money::from_cents(48_000),
            quantity: 2,
            line_total: Money::from_cents(96_000),
        }
    }

    #[test]
    fn test_order_id_shape() {
        let id = order_id();
        let (timestamp, suffix) = id.split_once('_').unwrap();
        assert_eq!(timestamp.len(), 14);
        assert_eq!(suffix.len(), 5);
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_format_product_row() {
        let config = StoreConfig::default();
        let product = Product::new(
            ProductId::new(101),
            "Rice (5lb)",
            Money::from_cents(48_000),
            25,
            "Groceries",
        )
        .unwrap();
        assert_eq!(
            format_product(&product, &config),
            "101. Rice (5lb)   $480.00 || Stock: 25 | Category: Groceries"
        );
    }

    #[test]
    fn test_receipt_contains_all_rows() {
        let config = StoreConfig::default();
        let outcome = PaymentOutcome {
            subtotal: Money::from_cents(600_000),
            tax: Money::from_cents(60_000),
            discount: Money::from_cents(30_000),
            total: Money::from_cents(630_000),
            amount_tendered: Money::from_cents(650_000),
            change: Money::from_cents(20_000),
        };

        let mut out = Vec::new();
        write_receipt(&mut out, &config, "dburton", &outcome, &[snapshot_line()]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Best Buy Retail Store"));
        assert!(text.contains("Cashier:  dburton"));
        assert!(text.contains("Rice (5lb)"));
        assert!(text.contains("Subtotal: $6000.00"));
        assert!(text.contains("Tax (10%): $600.00"));
        assert!(text.contains("Discount: -$300.00"));
        assert!(text.contains("Amount Paid: $6500.00"));
        assert!(text.contains("Change: $200.00"));
        assert!(text.contains("TOTAL DUE: $6300.00"));
    }

    #[test]
    fn test_receipt_hides_zero_discount() {
        let config = StoreConfig::default();
        let outcome = PaymentOutcome {
            subtotal: Money::from_cents(96_000),
            tax: Money::from_cents(9_600),
            discount: Money::zero(),
            total: Money::from_cents(105_600),
            amount_tendered: Money::from_cents(105_600),
            change: Money::zero(),
        };

        let mut out = Vec::new();
        write_receipt(&mut out, &config, "admin", &outcome, &[snapshot_line()]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!text.contains("Discount:"));
        assert!(text.contains("Change: $0.00"));
    }

    #[test]
    fn test_cart_view_shows_quote_in_fixed_order() {
        let config = StoreConfig::default();
        let totals = Totals {
            subtotal: Money::from_cents(96_000),
            tax: Money::from_cents(9_600),
            discount: Money::zero(),
            total: Money::from_cents(105_600),
        };

        let mut out = Vec::new();
        write_cart_view(&mut out, &config, &[snapshot_line()], &totals).unwrap();
        let text = String::from_utf8(out).unwrap();

        let subtotal_at = text.find("Subtotal:").unwrap();
        let tax_at = text.find("Tax (10%):").unwrap();
        let total_at = text.find("Total Payment Due:").unwrap();
        assert!(subtotal_at < tax_at && tax_at < total_at);
        assert!(text.contains("2 x Rice (5lb) @ $480.00   $960.00"));
    }
}
