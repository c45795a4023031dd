//! Grocery Tallies CLI
//!
//! Commands:
//! - units: list the unit choices and their dimensions
//! - totals [product]: per-product totals across all recipes
//! - shopping: totals grouped by store and category
//! - sum <quantity>...: aggregate ad-hoc quantities ("1 cup" "3 tbsp" "2")
//!
//! Options: --catalog <path> (default $TALLY_DATA_PATH or ./catalog.json),
//! --json. Logging goes to stderr, filtered by $TALLY_LOG.

mod config;

use std::io::{self, Write};
use std::process::ExitCode;
use clap::Parser;
use serde_json::json;
use tally_core::TallyError;
use tally_grocery::{Catalog, ShoppingList};
use tally_units::{aggregate, format_totals, parse_quantity_string, Quantity, UNITS};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Cli, Command};

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let config = Cli::parse();
    init_logging(&config.log_filter);

    let output = match run(&config) {
        Ok(output) => output,
        Err(e) => {
            warn!(code = %e.code, "command failed");
            if config.json {
                eprintln!("{}", json!({ "error": e }));
            } else {
                eprintln!("{}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", output).and_then(|_| stdout.flush()) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(config: &Cli) -> Result<String, TallyError> {
    match &config.command {
        Command::Units => Ok(list_units(config.json)),
        Command::Totals { product } => {
            let catalog = load_catalog(config)?;
            totals(&catalog, product.as_deref(), config.json)
        }
        Command::Shopping => {
            let catalog = load_catalog(config)?;
            let list = ShoppingList::build(&catalog)?;
            if config.json {
                to_json(&list)
            } else if list.is_empty() {
                Ok("Nothing to buy".to_string())
            } else {
                Ok(list.to_string().trim_end().to_string())
            }
        }
        Command::Sum { quantities } => sum(quantities, config.json),
    }
}

fn load_catalog(config: &Cli) -> Result<Catalog, TallyError> {
    let catalog = Catalog::load(&config.data_path)?;
    info!(
        path = %config.data_path.display(),
        products = catalog.products().len(),
        recipes = catalog.recipes().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn list_units(as_json: bool) -> String {
    if as_json {
        let units: Vec<_> = UNITS.units().iter()
            .map(|u| json!({ "unit": u.symbol(), "name": u.name(), "dimension": u.dimension() }))
            .collect();
        return json!(units).to_string();
    }
    UNITS.units().iter()
        .map(|u| format!("{:<6} {:<11} {}", u.symbol(), u.name(), u.dimension()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn totals(catalog: &Catalog, product: Option<&str>, as_json: bool) -> Result<String, TallyError> {
    let rows: Vec<(String, Vec<Quantity>)> = match product {
        Some(name) => {
            let found = catalog.product(name)
                .ok_or_else(|| TallyError::not_found("product", name))?;
            vec![(found.name.clone(), catalog.product_totals(name)?)]
        }
        None => catalog.all_totals()?
            .into_iter()
            .map(|(p, totals)| (p.name.clone(), totals))
            .collect(),
    };

    if as_json {
        let rows: Vec<_> = rows.iter()
            .map(|(name, totals)| json!({ "product": name, "totals": totals }))
            .collect();
        return Ok(json!(rows).to_string());
    }

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    Ok(rows.iter()
        .map(|(name, totals)| {
            let column = if totals.is_empty() { "-".to_string() } else { format_totals(totals) };
            format!("{:<width$}  {}", name, column, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

fn sum(inputs: &[String], as_json: bool) -> Result<String, TallyError> {
    let quantities = inputs.iter()
        .map(|s| parse_quantity_string(s).map_err(|e| TallyError::from(e).with_note(format!("in '{}'", s))))
        .collect::<Result<Vec<_>, _>>()?;
    let totals = aggregate(&quantities)?;
    if as_json {
        return to_json(&totals);
    }
    Ok(format_totals(&totals))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, TallyError> {
    serde_json::to_string_pretty(value).map_err(|e| TallyError::internal(e.to_string()))
}
