//! Woodie CLI - the wooden-crafts storefront from the terminal.
//!
//! Commands:
//! - `woodie products` - Browse, filter and sort the catalog
//! - `woodie categories` / `woodie category <slug>` - Category facets and pages
//! - `woodie banners` - Active home page banners
//! - `woodie product <slug>` - Product detail with variant pricing
//! - `woodie cart` - Manage the persisted cart
//! - `woodie checkout` - Order summary for the cart or a single product
//! - `woodie serve` - Run the same-origin proxy routes
//! - `woodie config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CartArgs, CategoryArgs, CheckoutArgs, ConfigArgs, ProductArgs, ProductsArgs, ServeArgs,
};

/// Woodie CLI - Browse the catalog, manage the cart and run the storefront proxy
#[derive(Parser)]
#[command(name = "woodie")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with filters and sorting
    Products(ProductsArgs),

    /// List product categories
    Categories,

    /// Show the products of one category
    Category(CategoryArgs),

    /// List active banners
    Banners,

    /// Show product details
    Product(ProductArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Show the order summary
    Checkout(CheckoutArgs),

    /// Run the proxy server
    Serve(ServeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Category(args) => commands::catalog::category(args, &ctx).await,
        Commands::Banners => commands::catalog::banners(&ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Serve(args) => commands::serve::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings, or debug for our
/// crates with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,woodie=debug,woodie_commerce=debug,woodie_data=debug,woodie_proxy=debug,tower_http=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
