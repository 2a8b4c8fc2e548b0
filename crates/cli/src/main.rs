//! FaithWear CLI - catalog lookup and cart management from the terminal.
//!
//! Works on the same cart file the storefront serves, so it is handy for
//! inspecting or fixing a cart without a browser. Stop the storefront first
//! if you edit the cart here; it only reads the file at startup.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, cheapest first
//! fw-cli catalog --sort price-asc
//!
//! # Search by name or verse
//! fw-cli catalog --query psalm
//!
//! # Show and edit the cart
//! fw-cli cart show
//! fw-cli cart add ps91 --size L
//! fw-cli cart update ps91 L -1
//! fw-cli cart remove ps91 L
//! fw-cli cart clear
//!
//! # Preview the payment widget options for the current cart
//! fw-cli checkout --key-id rzp_test_1DP5mmOlF5G5ag --email buyer@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `FAITHWEAR_DATA_DIR` - Directory holding the persisted cart (default: ./data)
//! - `RAZORPAY_KEY_ID` - Key id used by `checkout` when `--key-id` is omitted
//! - `STORE_NAME` - Store name shown in the payment widget

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use faithwear_core::{CartEngine, Catalog};
use faithwear_storefront::FileStorage;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "fw-cli")]
#[command(author, version, about = "FaithWear CLI tools")]
struct Cli {
    /// Directory holding the persisted cart
    #[arg(long, env = "FAITHWEAR_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Case-insensitive match against name or verse
        #[arg(short, long)]
        query: Option<String>,

        /// `featured`, `price-asc` or `price-desc`
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Inspect or edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the payment widget options for the current cart
    Checkout {
        /// Razorpay key id (`rzp_test_...` or `rzp_live_...`)
        #[arg(long, env = "RAZORPAY_KEY_ID")]
        key_id: String,

        /// Store name shown in the widget
        #[arg(long, env = "STORE_NAME", default_value = "FaithWear Co.")]
        store_name: String,

        /// Shopper name
        #[arg(long, default_value = "")]
        name: String,

        /// Shopper email
        #[arg(long, default_value = "")]
        email: String,

        /// Shipping address
        #[arg(long, default_value = "")]
        address: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id, e.g. `ps91`
        product_id: String,

        /// Size (defaults to M)
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Change a line's quantity by a signed delta
    Update {
        product_id: String,
        size: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a line
    Remove { product_id: String, size: String },
    /// Empty the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();

    if let Err(e) = run(cli, &mut out) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let catalog = Catalog::default();

    match cli.command {
        Commands::Catalog { query, sort } => {
            commands::catalog::list(&catalog, query.as_deref(), sort.as_deref(), out)?;
        }
        Commands::Cart { action } => {
            let mut cart = CartEngine::restore(FileStorage::open(&cli.data_dir)?);
            match action {
                CartAction::Show => {}
                CartAction::Add { product_id, size } => {
                    commands::cart::add(&mut cart, &catalog, &product_id, size.as_deref())?;
                }
                CartAction::Update {
                    product_id,
                    size,
                    delta,
                } => commands::cart::update(&mut cart, &product_id, &size, delta)?,
                CartAction::Remove { product_id, size } => {
                    commands::cart::remove(&mut cart, &product_id, &size)?;
                }
                CartAction::Clear => cart.clear(),
            }
            commands::cart::show(&cart, &catalog, out)?;
        }
        Commands::Checkout {
            key_id,
            store_name,
            name,
            email,
            address,
        } => {
            let cart = CartEngine::restore(FileStorage::open(&cli.data_dir)?);
            let shipping = commands::checkout::Shipping {
                name: &name,
                email: &email,
                address: &address,
            };
            commands::checkout::preview(&cart, &catalog, &key_id, &store_name, &shipping, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use faithwear_core::CART_KEY;

    use super::*;

    fn cart(data_dir: &std::path::Path, action: CartAction) -> String {
        let cli = Cli {
            data_dir: data_dir.to_path_buf(),
            command: Commands::Cart { action },
        };
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cart_commands_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let add = || CartAction::Add {
            product_id: "ps91".to_string(),
            size: Some("L".to_string()),
        };

        cart(dir.path(), add());
        let output = cart(dir.path(), add());
        assert!(output.contains("Items: 2"));

        let raw = fs::read_to_string(dir.path().join(format!("{CART_KEY}.json"))).unwrap();
        assert_eq!(raw, r#"[{"id":"ps91","size":"L","qty":2}]"#);

        let output = cart(
            dir.path(),
            CartAction::Update {
                product_id: "ps91".to_string(),
                size: "L".to_string(),
                delta: -2,
            },
        );
        assert_eq!(output.trim(), "Cart is empty.");
        assert_eq!(cart(dir.path(), CartAction::Show).trim(), "Cart is empty.");
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_delta_parses() {
        let cli = Cli::try_parse_from(["fw-cli", "cart", "update", "ps91", "M", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Update { delta: -1, .. }
            }
        ));
    }
}
