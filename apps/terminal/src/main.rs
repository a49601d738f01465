//! # PayPoint Terminal Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load store configuration (defaults + `PAYPOINT_*` env overrides)
//! 3. Seed the catalog and the demo accounts
//! 4. Build the register context (catalog + pricing policy + role gate)
//! 5. Run the interactive shell over stdin/stdout

mod auth;
mod config;
mod menu;
mod receipt;
mod seed;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use paypoint_core::{Catalog, Register};

use crate::auth::UserStore;
use crate::config::StoreConfig;
use crate::menu::Shell;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = StoreConfig::from_env();
    info!(store = %config.store_name, tax_bps = config.tax_rate_bps, "starting PayPoint POS");

    let catalog = Catalog::seed(seed::default_products()?)?;
    let register = Register::with_standard_pricing(catalog, config.tax_rate());
    let users = UserStore::new(seed::default_users());

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut shell = Shell::new(stdin, stdout, &register, &config, &users);

    match shell.run() {
        Ok(()) => Ok(()),
        // Input stream closed (e.g. piped input ran out): a normal exit.
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=paypoint_terminal=trace` - Trace the shell only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,paypoint_core=debug,paypoint_terminal=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
