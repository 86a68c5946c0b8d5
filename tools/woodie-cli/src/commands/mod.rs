//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod product;
pub mod serve;

use clap::{Args, Subcommand};
use woodie_commerce::catalog::SortOrder;
use woodie_commerce::checkout::PaymentMethod;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show products in this category, by name or slug (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Minimum price in taka.
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum price in taka.
    #[arg(long)]
    pub max: Option<String>,

    /// Sort by price: asc or desc.
    #[arg(short, long, default_value = "asc")]
    pub sort: SortOrder,
}

/// Arguments for the category command.
#[derive(Args)]
pub struct CategoryArgs {
    /// Category slug, e.g. `living-room`.
    pub slug: String,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product path or id.
    pub slug: String,

    /// Attribute selection as `Name=Value` (repeatable).
    #[arg(short, long = "attr")]
    pub attrs: Vec<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product path or id.
        slug: String,
        /// Units to add.
        #[arg(short, long, default_value = "1")]
        qty: String,
        /// Attribute selection as `Name=Value` (repeatable).
        #[arg(short, long = "attr")]
        attrs: Vec<String>,
    },
    /// Remove a line.
    Remove {
        /// Line id as shown by `cart show`.
        id: String,
    },
    /// Set a line's quantity.
    Set {
        /// Line id.
        id: String,
        /// New quantity (at least 1).
        qty: String,
    },
    /// Add one unit to a line.
    Inc {
        /// Line id.
        id: String,
    },
    /// Remove one unit from a line (never below 1).
    Dec {
        /// Line id.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Buy a single product instead of the cart.
    #[arg(short, long)]
    pub product: Option<String>,

    /// Units for `--product`.
    #[arg(short, long, requires = "product")]
    pub qty: Option<String>,

    /// Delivery area code: inside_dhaka, outside_dhaka or others.
    #[arg(short, long)]
    pub area: Option<String>,

    /// Payment method: cod or online.
    #[arg(long, default_value = "cod")]
    pub payment: PaymentMethod,
}

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (default from config).
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
