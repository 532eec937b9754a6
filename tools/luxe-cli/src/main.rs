//! Luxe CLI - the LUXE fragrance storefront in a terminal.
//!
//! Commands:
//! - `luxe catalog` - Browse the collection
//! - `luxe cart` - Show and edit the cart
//! - `luxe promo` - Apply a promo code
//! - `luxe wishlist` - Show and edit the wishlist, move items to the cart
//! - `luxe login` / `luxe logout` - Manage the access token
//! - `luxe checkout` - Check out the cart
//! - `luxe splash` - Play the loading sequence
//! - `luxe config` - Manage configuration

mod commands;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, LoginArgs, LogoutArgs, PromoArgs,
    SignupArgs, SplashArgs, WishlistArgs,
};

/// Luxe CLI - Shop the LUXE fragrance collection
#[derive(Parser)]
#[command(name = "luxe")]
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

    /// Directory holding the saved cart, wishlist and token
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the collection
    Catalog(CatalogArgs),

    /// Show and edit the cart
    Cart(CartArgs),

    /// Apply or clear a promo code
    Promo(PromoArgs),

    /// Show and edit the wishlist
    Wishlist(WishlistArgs),

    /// Sign in with an access token
    Login(LoginArgs),

    /// Create an account from a signup response
    Signup(SignupArgs),

    /// Sign out and clear the cart and wishlist
    Logout(LogoutArgs),

    /// Check out the cart
    Checkout(CheckoutArgs),

    /// Play the loading sequence
    Splash(SplashArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "luxe=debug" } else { "luxe=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.store, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Promo(args) => commands::promo::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Signup(args) => commands::auth::signup(args, &ctx).await,
        Commands::Logout(args) => commands::auth::logout(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Splash(args) => commands::splash::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
