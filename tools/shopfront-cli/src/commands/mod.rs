//! CLI command implementations.

pub mod add;
pub mod clear;
pub mod config;
pub mod remove;
pub mod show;
pub mod update;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID (ignored when --product is given).
    #[arg(required_unless_present = "product")]
    pub id: Option<String>,

    /// JSON file holding the catalog record for the product.
    #[arg(short, long)]
    pub product: Option<String>,

    /// Product name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Unit price in major units (e.g. 24.50).
    #[arg(long)]
    pub price: Option<f64>,

    /// Number of units to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,

    /// Units in stock.
    #[arg(long)]
    pub stock: Option<i64>,

    /// Category display name.
    #[arg(long)]
    pub category: Option<String>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// Refuse to add more than the product's stock allows.
    #[arg(long)]
    pub check_stock: bool,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID.
    pub id: String,

    /// New quantity.
    pub quantity: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
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
