//! restaurant-analytics CLI entry point
//!
//! Parses arguments and dispatches to the CLI module. All configuration
//! loading, connection setup and serving happens in `cli::run`.

use restaurant_analytics::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
