//! Command line and environment configuration

use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "Tally recipe quantities into grocery totals", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Catalog file
    #[arg(long = "catalog", global = true, env = "TALLY_DATA_PATH", default_value = "catalog.json")]
    pub data_path: PathBuf,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// `tracing` filter directive
    #[arg(long = "log", global = true, env = "TALLY_LOG", default_value = "info")]
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List unit choices and their dimensions
    Units,

    /// Per-product totals across all recipes
    Totals {
        /// Only this product
        product: Option<String>,
    },

    /// Totals grouped by store and category
    Shopping,

    /// Add up quantities, e.g. tally sum "1 cup" "3 tbsp" 2
    Sum {
        #[arg(required = true)]
        quantities: Vec<String>,
    },
}
