//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `stockroom_core` wiring against the configured database.
//! - Print products as a formatted key-value dump.
//!
//! Usage: `stockroom_cli [show <id>]`. Without arguments every product is
//! listed.

use std::process::ExitCode;
use stockroom_core::{init_logging, parse_id, Inventory, Product, StoreConfig};

fn main() -> ExitCode {
    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Store failures are swallowed by `Inventory` and only surface through
    // the logger, so it is started even without a log directory.
    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("logging disabled: {err}");
    }

    println!("stockroom_core version={}", stockroom_core::core_version());
    println!("db_path={}", config.db_path.display());

    let inventory = Inventory::from_config(&config);
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            let products = inventory.list_all();
            if products.is_empty() {
                println!("No products.");
            }
            for product in &products {
                print_product(product);
            }
            ExitCode::SUCCESS
        }
        [command, raw_id] if command == "show" => {
            let id = match parse_id(raw_id) {
                Ok(id) => id,
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::FAILURE;
                }
            };
            match inventory.read_by_id(id) {
                Some(product) => {
                    print_product(&product);
                    ExitCode::SUCCESS
                }
                None => {
                    println!("Product {id} not found.");
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            eprintln!("usage: stockroom_cli [show <id>]");
            ExitCode::FAILURE
        }
    }
}

fn print_product(product: &Product) {
    match serde_json::to_string_pretty(&product.to_display_record()) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to format product {}: {err}", product.id()),
    }
}
