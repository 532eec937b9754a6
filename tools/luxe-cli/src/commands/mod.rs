//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod promo;
pub mod splash;
pub mod wishlist;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Show details for one product.
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its total.
    Show,
    /// Add a product.
    Add {
        /// Product id.
        id: String,
        /// How many to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a product entirely.
    Remove {
        /// Product id.
        id: String,
    },
    /// Raise a quantity (by one, or to `--to`).
    Inc {
        /// Product id.
        id: String,
        /// Target quantity.
        #[arg(long)]
        to: Option<u32>,
    },
    /// Lower a quantity by one. At one, the item is removed.
    Dec {
        /// Product id.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the promo command.
#[derive(Args)]
pub struct PromoArgs {
    /// Code to apply.
    pub code: Option<String>,

    /// Remove the applied code.
    #[arg(long, conflicts_with = "code")]
    pub clear: bool,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Show saved items.
    Show,
    /// Save a product.
    Add {
        /// Product id.
        id: String,
    },
    /// Remove a saved product.
    Remove {
        /// Product id.
        id: String,
    },
    /// Move selected in-stock items to the cart.
    Move {
        /// Product ids. Prompts when empty.
        ids: Vec<String>,
        /// Select every saved item.
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
    /// Remove every saved item.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Access token issued by the auth endpoint.
    #[arg(long, conflicts_with = "response")]
    pub token: Option<String>,

    /// File holding a login or signup response body.
    #[arg(long)]
    pub response: Option<PathBuf>,

    /// Email the response was issued for. Checked before the response is applied.
    #[arg(long, requires = "response", conflicts_with = "token")]
    pub email: Option<String>,

    /// Password for `--email`. Prompted for when omitted.
    #[arg(long, requires = "email")]
    pub password: Option<String>,
}

/// Arguments for the signup command.
#[derive(Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    /// File holding the signup endpoint's response body.
    #[arg(long)]
    pub response: PathBuf,
}

/// Arguments for the logout command.
#[derive(Args)]
pub struct LogoutArgs {
    /// Skip confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the splash command.
#[derive(Args)]
pub struct SplashArgs {
    /// Jump straight to the loaded state.
    #[arg(long)]
    pub skip: bool,
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
    /// Validate the config file.
    Validate,
}
