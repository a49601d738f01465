//! # Interactive Shell
//!
//! Menus, prompts, and the checkout dialogue. Every flow here is a thin
//! driver of the core's transaction controller: the shell collects input,
//! calls one controller operation, and renders the outcome. Retry loops
//! follow the controller's states rather than keeping any pricing or stock
//! knowledge of their own.
//!
//! Input and output are generic over `BufRead`/`Write`, so the whole
//! dialogue is scriptable in tests without a terminal.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use paypoint_core::checkout::{CancelOutcome, CheckoutState, RemovalOutcome, TenderOutcome};
use paypoint_core::{validation, CartUpdate, Money, Principal, ProductId, Register, Transaction};

use crate::auth::{UserStore, MAX_LOGIN_ATTEMPTS};
use crate::config::StoreConfig;
use crate::receipt;

/// How a checkout attempt ended, from the menu's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckoutEnd {
    /// Committed or cancelled: the transaction is over.
    Settled,
    /// Aborted back to Open: the transaction menu continues.
    Reopened,
}

/// What the payment loop should do after the shortfall options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShortfallNext {
    Retry,
    Settled,
    Reopened,
}

/// The interactive register shell.
pub struct Shell<'a, R, W> {
    input: R,
    out: W,
    register: &'a Register,
    config: &'a StoreConfig,
    users: &'a UserStore,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Creates a shell over the given I/O and register context.
    pub fn new(
        input: R,
        out: W,
        register: &'a Register,
        config: &'a StoreConfig,
        users: &'a UserStore,
    ) -> Self {
        Shell {
            input,
            out,
            register,
            config,
            users,
        }
    }

    /// Runs the shell: login, then the main menu until exit.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{} PayPoint POS System", self.config.store_name)?;

        let Some(mut principal) = self.login()? else {
            writeln!(self.out, "Exiting system...")?;
            return Ok(());
        };

        loop {
            self.write_main_menu()?;
            let choice = self.prompt("\nSelect an option: ")?;
            match choice.as_str() {
                "1" => self.run_transaction(&principal)?,
                "2" => self.write_inventory()?,
                "3" => {
                    info!(user = %principal.username(), "logout");
                    match self.login()? {
                        Some(next) => principal = next,
                        None => {
                            writeln!(self.out, "Logged out.")?;
                            return Ok(());
                        }
                    }
                }
                "4" => {
                    writeln!(self.out, "Exiting PayPoint... Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice. Try again.")?,
            }
        }
    }

    // =========================================================================
    // Login
    // =========================================================================

    fn login(&mut self) -> io::Result<Option<Principal>> {
        let mut attempts = MAX_LOGIN_ATTEMPTS;
        while attempts > 0 {
            writeln!(self.out, "\n{}", "=".repeat(25))?;
            writeln!(self.out, "{:^25}", "LOGIN")?;
            writeln!(self.out, "{}", "=".repeat(25))?;
            let username = self.prompt("Username: ")?;
            let password = self.prompt("Password: ")?;

            if let Some(principal) = self.users.authenticate(&username, &password) {
                writeln!(self.out, "\nWelcome, {}!", principal.username())?;
                info!(user = %principal.username(), role = ?principal.role(), "login");
                return Ok(Some(principal));
            }

            attempts -= 1;
            warn!(user = %username, remaining = attempts, "failed login");
            writeln!(
                self.out,
                "Invalid credentials. {attempts} attempts remaining."
            )?;
        }

        writeln!(
            self.out,
            "Login attempts exceeded! Please relaunch application."
        )?;
        Ok(None)
    }

    /// One-shot admin re-authentication for the checkout override. The
    /// elevated principal is returned to the caller and dropped after its
    /// single use; the session principal is untouched.
    fn admin_login(&mut self) -> io::Result<Option<Principal>> {
        writeln!(self.out, "\n{}", "=".repeat(25))?;
        writeln!(self.out, "{:^25}", "ADMIN LOGIN")?;
        writeln!(self.out, "{}", "=".repeat(25))?;
        let username = self.prompt("Admin Username: ")?;
        let password = self.prompt("Admin Password: ")?;

        match self.users.authenticate(&username, &password) {
            Some(principal) if self.register.gate().is_privileged(&principal) => {
                writeln!(self.out, "\nAdmin {} logged in.", principal.username())?;
                info!(user = %principal.username(), "admin override");
                Ok(Some(principal))
            }
            _ => {
                writeln!(self.out, "\nAdmin login failed. Please retry.")?;
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Transaction Menu
    // =========================================================================

    fn run_transaction(&mut self, principal: &Principal) -> io::Result<()> {
        let mut tx = self.register.begin_transaction();
        loop {
            writeln!(self.out, "\n=== New Transaction ===")?;
            writeln!(self.out, "1. Add Item(s)")?;
            writeln!(self.out, "2. Remove Item(s)")?;
            writeln!(self.out, "3. View Cart")?;
            writeln!(self.out, "4. Checkout")?;
            writeln!(self.out, "5. Cancel Transaction")?;

            let choice = self.prompt("\nSelect an option: ")?;
            match choice.as_str() {
                "1" => self.add_item(&mut tx)?,
                "2" => self.remove_item(&mut tx, principal)?,
                "3" => self.write_cart(&tx)?,
                "4" => {
                    if self.checkout(&mut tx, principal)? == CheckoutEnd::Settled {
                        return Ok(());
                    }
                }
                "5" => {
                    let confirmed = self.confirm("Confirm cancelled transaction? (yes/no): ")?;
                    if let Ok(CancelOutcome::Cancelled) = tx.cancel(confirmed) {
                        writeln!(self.out, "Transaction cancelled. Inventory restored.")?;
                        info!("transaction cancelled");
                        return Ok(());
                    }
                }
                _ => writeln!(self.out, "Invalid choice. Try again.")?,
            }
        }
    }

    fn add_item(&mut self, tx: &mut Transaction) -> io::Result<()> {
        let raw = self.prompt("Search product by name/category (or leave blank to view all): ")?;
        let query = match validation::validate_search_query(&raw) {
            Ok(query) => query,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(());
            }
        };
        if query.is_empty() {
            self.write_inventory()?;
        } else {
            let results = self.register.catalog().search(&query);
            if results.is_empty() {
                writeln!(self.out, "No matching products found.")?;
                return Ok(());
            }
            writeln!(self.out, "\n=== Search Results ===")?;
            for product in &results {
                let row = receipt::format_product(&product.snapshot(), self.config);
                writeln!(self.out, "{row}")?;
            }
        }

        let Some(product_id) = self.prompt_product_id("\nEnter Product ID: ")? else {
            return Ok(());
        };
        let product = match self.register.catalog().find(product_id) {
            Ok(product) => product,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(());
            }
        };

        let (name, stock) = product.with(|p| (p.name.clone(), p.stock));
        let Some(quantity) =
            self.prompt_i64(&format!("Enter quantity for {name} (Stock: {stock}): "))?
        else {
            return Ok(());
        };

        match tx.add_line(&product, quantity) {
            Ok(update) => {
                debug!(product = %update.product_id, quantity, "added to cart");
                writeln!(self.out, "Added {} {}(s) to cart.", quantity, update.name)?;
                self.write_low_stock_alert(&update)?;
            }
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(())
    }

    fn remove_item(&mut self, tx: &mut Transaction, principal: &Principal) -> io::Result<()> {
        if !self.register.gate().is_privileged(principal) {
            writeln!(self.out, "Access denied. Admin privileges required.")?;
            return Ok(());
        }
        if tx.cart().is_empty() {
            writeln!(self.out, "Cart is empty.")?;
            return Ok(());
        }

        self.write_cart(tx)?;
        let Some(product_id) = self.prompt_product_id("Enter Product ID to remove: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt_i64("Enter quantity to remove: ")? else {
            return Ok(());
        };

        match tx.remove_line(product_id, quantity, principal) {
            Ok(update) => {
                debug!(product = %update.product_id, quantity, "removed from cart");
                writeln!(
                    self.out,
                    "Removed {} x {}. Cart quantity now {}.",
                    quantity, update.name, update.line_quantity
                )?;
                writeln!(
                    self.out,
                    "Product stock updated to: {}.",
                    update.stock_remaining
                )?;
                self.write_low_stock_alert(&update)?;
                if tx.cart().is_empty() {
                    writeln!(self.out, "Cart is now empty.")?;
                } else {
                    let totals = tx.totals();
                    writeln!(
                        self.out,
                        "Updated Cart Total: {}",
                        self.config.format_money(totals.total)
                    )?;
                }
            }
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(())
    }

    // =========================================================================
    // Checkout Dialogue
    // =========================================================================

    fn checkout(&mut self, tx: &mut Transaction, principal: &Principal) -> io::Result<CheckoutEnd> {
        if let Err(err) = tx.begin_checkout() {
            writeln!(self.out, "{err}. Add item(s) before you can checkout.")?;
            return Ok(CheckoutEnd::Reopened);
        }

        loop {
            self.write_cart(tx)?;
            // Recomputed at every display; the controller caches nothing.
            let totals = tx.totals();
            receipt::write_payment_summary(&mut self.out, self.config, &totals)?;

            let raw = self.prompt(&format!(
                "\nTotal Due: {}\nEnter payment amount: $",
                self.config.format_money(totals.total)
            ))?;
            let amount: Money = match raw.parse() {
                Ok(amount) => amount,
                Err(err) => {
                    writeln!(self.out, "{err}. Enter a valid number.")?;
                    continue;
                }
            };

            match tx.tender(amount) {
                Ok(TenderOutcome::Committed { outcome, lines }) => {
                    info!(total = %outcome.total, change = %outcome.change, "sale committed");
                    receipt::write_receipt(
                        &mut self.out,
                        self.config,
                        principal.username(),
                        &outcome,
                        &lines,
                    )?;
                    return Ok(CheckoutEnd::Settled);
                }
                Ok(TenderOutcome::Shortfall { short_by, .. }) => {
                    writeln!(
                        self.out,
                        "\nInsufficient payment. You need {} more.",
                        self.config.format_money(short_by)
                    )?;
                    match self.shortfall_options(tx, principal)? {
                        ShortfallNext::Retry => continue,
                        ShortfallNext::Settled => return Ok(CheckoutEnd::Settled),
                        ShortfallNext::Reopened => return Ok(CheckoutEnd::Reopened),
                    }
                }
                Err(err) => {
                    writeln!(self.out, "{err}")?;
                    continue;
                }
            }
        }
    }

    fn shortfall_options(
        &mut self,
        tx: &mut Transaction,
        principal: &Principal,
    ) -> io::Result<ShortfallNext> {
        loop {
            let choice = self.prompt(
                "Would you like to:\n1. Add more funds\n2. Remove items\n3. Cancel checkout\n\nEnter option here: ",
            )?;
            match choice.as_str() {
                "1" => return Ok(ShortfallNext::Retry),
                "2" => {
                    let acting = if self.register.gate().is_privileged(principal) {
                        principal.clone()
                    } else {
                        writeln!(
                            self.out,
                            "\nAdmin privileges required to remove items during checkout."
                        )?;
                        writeln!(self.out, "Please call a supervisor or add more funds.")?;
                        if !self.confirm("\nSwitch to admin? (yes/no): ")? {
                            writeln!(self.out, "Returning to payment options...")?;
                            continue;
                        }
                        match self.admin_login()? {
                            // Elevated for exactly this one removal.
                            Some(admin) => admin,
                            None => continue,
                        }
                    };
                    return self.shortfall_removal(tx, &acting);
                }
                "3" => {
                    if self.confirm("\nConfirm transaction cancellation (yes/no): ")? {
                        if let Ok(CancelOutcome::Cancelled) = tx.cancel(true) {
                            writeln!(self.out, "Transaction cancelled. Inventory restored.")?;
                            info!("checkout cancelled");
                            return Ok(ShortfallNext::Settled);
                        }
                    } else {
                        writeln!(self.out, "\nCheckout cancellation aborted.")?;
                    }
                }
                _ => writeln!(self.out, "\nInvalid choice. Please try again.")?,
            }
        }
    }

    fn shortfall_removal(
        &mut self,
        tx: &mut Transaction,
        acting: &Principal,
    ) -> io::Result<ShortfallNext> {
        self.write_cart(tx)?;
        let Some(product_id) = self.prompt_product_id("Enter Product ID to remove: ")? else {
            return Ok(ShortfallNext::Retry);
        };
        let Some(quantity) = self.prompt_i64("Enter quantity to remove: ")? else {
            return Ok(ShortfallNext::Retry);
        };

        match tx.remove_during_shortfall(product_id, quantity, acting) {
            Ok(RemovalOutcome::Repriced { update, totals }) => {
                writeln!(self.out, "Removed {} x {}.", quantity, update.name)?;
                self.write_low_stock_alert(&update)?;
                writeln!(
                    self.out,
                    "Updated Cart Total: {}",
                    self.config.format_money(totals.total)
                )?;
                Ok(ShortfallNext::Retry)
            }
            Ok(RemovalOutcome::CartEmptied { .. }) => {
                writeln!(
                    self.out,
                    "Cart is now empty. Checkout aborted; returning to transaction menu."
                )?;
                Ok(ShortfallNext::Reopened)
            }
            Err(err) => {
                writeln!(self.out, "{err}")?;
                if tx.state() == CheckoutState::Open {
                    writeln!(
                        self.out,
                        "No items removed. Checkout aborted; returning to transaction menu."
                    )?;
                    Ok(ShortfallNext::Reopened)
                } else {
                    // Unauthorized is recoverable: back to the options.
                    Ok(ShortfallNext::Retry)
                }
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn write_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", "=".repeat(30))?;
        writeln!(self.out, "{:^30}", "PayPoint POS Menu")?;
        writeln!(self.out, "{}", "=".repeat(30))?;
        writeln!(self.out, "1. New Transaction")?;
        writeln!(self.out, "2. View Inventory")?;
        writeln!(self.out, "3. Logout")?;
        writeln!(self.out, "4. Exit")?;
        writeln!(self.out, "{}", "=".repeat(30))
    }

    fn write_inventory(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n       === Current Inventory ===")?;
        for (digit, products) in self.register.catalog().group_by_leading_digit() {
            writeln!(self.out, "\nCategory {digit} Items:")?;
            for product in products {
                let row = receipt::format_product(&product.snapshot(), self.config);
                writeln!(self.out, "  {row}")?;
            }
        }
        writeln!(self.out, "{}", "*".repeat(55))
    }

    fn write_cart(&mut self, tx: &Transaction) -> io::Result<()> {
        if tx.cart().is_empty() {
            return writeln!(self.out, "Cart is empty.");
        }
        let lines = tx.cart().snapshot_lines();
        let totals = tx.totals();
        receipt::write_cart_view(&mut self.out, self.config, &lines, &totals)
    }

    fn write_low_stock_alert(&mut self, update: &CartUpdate) -> io::Result<()> {
        if update.low_stock {
            warn!(product = %update.product_id, stock = update.stock_remaining, "low stock");
            writeln!(
                self.out,
                "⚠ Low Stock Alert: {} only has {} left!",
                update.name, update.stock_remaining
            )?;
        }
        Ok(())
    }

    // =========================================================================
    // Prompt Helpers
    // =========================================================================

    fn prompt(&mut self, msg: &str) -> io::Result<String> {
        write!(self.out, "{msg}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn confirm(&mut self, msg: &str) -> io::Result<bool> {
        let answer = self.prompt(msg)?.to_lowercase();
        Ok(matches!(answer.as_str(), "yes" | "y"))
    }

    fn prompt_product_id(&mut self, msg: &str) -> io::Result<Option<ProductId>> {
        let raw = self.prompt(msg)?;
        match raw.parse::<u32>() {
            Ok(id) => Ok(Some(ProductId::new(id))),
            Err(_) => {
                writeln!(self.out, "Invalid input. Please enter numbers only.")?;
                Ok(None)
            }
        }
    }

    fn prompt_i64(&mut self, msg: &str) -> io::Result<Option<i64>> {
        let raw = self.prompt(msg)?;
        match raw.parse::<i64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.out, "Invalid input. Please enter numbers only.")?;
                Ok(None)
            }
        }
    }
}

// =============================================================================
// Scripted Session Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use paypoint_core::Catalog;

    use super::*;
    use crate::seed;

    fn register() -> Register {
        let config = StoreConfig::default();
        let catalog = Catalog::seed(seed::default_products().unwrap()).unwrap();
        Register::with_standard_pricing(catalog, config.tax_rate())
    }

    /// Runs a scripted session and returns everything the shell printed.
    fn run_script(register: &Register, script: &str) -> String {
        let config = StoreConfig::default();
        let users = UserStore::new(seed::default_users());
        let mut out = Vec::new();
        {
            let mut shell = Shell::new(Cursor::new(script.to_string()), &mut out, register, &config, &users);
            shell.run().unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scripted_committed_sale() {
        let register = register();

        // login, new transaction, add 2 rice (via blank search), checkout,
        // pay exact total ($1056.00), back at main menu, exit.
        let script = "admin\nadmin123\n1\n1\n\n101\n2\n4\n1056\n4\n";
        let output = run_script(&register, script);

        assert!(output.contains("Welcome, admin!"));
        assert!(output.contains("Added 2 Rice (5lb)(s) to cart."));
        assert!(output.contains("TOTAL DUE: $1056.00"));
        assert!(output.contains("Change: $0.00"));
        assert!(output.contains("Thank you for shopping with us!"));

        // Commit is permanent: the reservation stays applied.
        let rice = register.catalog().find(ProductId::new(101)).unwrap();
        assert_eq!(rice.with(|p| p.stock), 23);
    }

    #[test]
    fn scripted_shortfall_with_admin_override() {
        let register = register();

        // Cashier adds a desk fan, tenders $100, picks "remove items",
        // switches to admin for one removal that empties the cart (checkout
        // aborts to the transaction menu), cancels the transaction, exits.
        let script = "dburton\nchiching\n1\n1\nfan\n207\n1\n4\n100\n2\nyes\nadmin\nadmin123\n207\n1\n5\nyes\n4\n";
        let output = run_script(&register, script);

        assert!(output.contains("Insufficient payment."));
        assert!(output.contains("Admin privileges required to remove items during checkout."));
        assert!(output.contains("Admin admin logged in."));
        assert!(output.contains("Cart is now empty. Checkout aborted"));

        // The removal restored the reservation.
        let fan = register.catalog().find(ProductId::new(207)).unwrap();
        assert_eq!(fan.with(|p| p.stock), 12);
    }

    #[test]
    fn scripted_cashier_cannot_remove_outside_checkout() {
        let register = register();

        // Cashier adds rice, tries the remove option, is denied, cancels.
        let script = "dburton\nchiching\n1\n1\n\n101\n2\n2\n5\nyes\n4\n";
        let output = run_script(&register, script);

        assert!(output.contains("Access denied. Admin privileges required."));
        assert!(output.contains("Transaction cancelled. Inventory restored."));

        let rice = register.catalog().find(ProductId::new(101)).unwrap();
        assert_eq!(rice.with(|p| p.stock), 25);
    }

    #[test]
    fn scripted_lockout_after_three_failures() {
        let register = register();

        let script = "ghost\nnope\nghost\nnope\nghost\nnope\n";
        let output = run_script(&register, script);

        assert!(output.contains("Invalid credentials. 2 attempts remaining."));
        assert!(output.contains("Login attempts exceeded! Please relaunch application."));
        assert!(output.contains("Exiting system..."));
    }

    #[test]
    fn scripted_malformed_payment_reprompts() {
        let register = register();

        // "abc" is rejected without touching the controller, then the sale
        // commits on the corrected amount.
        let script = "admin\nadmin123\n1\n1\n\n101\n1\n4\nabc\n528\n4\n";
        let output = run_script(&register, script);

        assert!(output.contains("is not a valid amount"));
        assert!(output.contains("Change: $0.00"));
    }
}
