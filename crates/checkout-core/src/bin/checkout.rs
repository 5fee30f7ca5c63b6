//! # Checkout Driver
//!
//! Computes the checkout for a cart document on disk and prints it as JSON.
//!
//! ## Usage
//! ```bash
//! # Cart from a file
//! cargo run -p checkout-core --bin checkout -- ./cart.json
//!
//! # Cart from stdin, with a config file
//! cat cart.json | cargo run -p checkout-core --bin checkout -- --config ./checkout.toml
//!
//! # More logging
//! RUST_LOG=checkout_core=trace cargo run -p checkout-core --bin checkout -- ./cart.json
//! ```
//!
//! Logs go to stderr so stdout stays valid JSON.

use std::env;
use std::io::Read;
use std::path::PathBuf;

use checkout_core::{xform_cart_checkout, Cart, CheckoutConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut cart_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Checkout Driver");
                println!();
                println!("Usage: checkout [OPTIONS] [CART_JSON]");
                println!();
                println!("Reads the cart from CART_JSON, or from stdin when omitted.");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  TOML config file");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => cart_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let config = CheckoutConfig::load(config_path.as_deref())?;

    let json = match &cart_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let cart = Cart::from_json(&json)?;
    info!(
        items = cart.items.len(),
        groups = cart.shipping.len(),
        policy = %config.null_fulfillment_total(),
        "Computing checkout"
    );

    let checkout = xform_cart_checkout(&cart, &config);
    println!("{}", serde_json::to_string_pretty(&checkout)?);

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=checkout_core=trace` - Per-group transformation traces
/// - Default: INFO, DEBUG for this crate
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
