use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use quotekit_core::SessionId;
use quotekit_observability::LogFormat;
use quotekit_pricing::{BillingCycle, parse_seat_count, per_seat_rate, price};
use quotekit_quote::SelectionMode;

use quotekit_console::{ConsoleApp, ConsoleConfig, render};

#[derive(Debug, Parser)]
#[command(name = "quotekit", version, about = "Product quote wizard")]
struct Cli {
    /// How picking a product treats the existing list (replace | accumulate).
    #[arg(long, global = true)]
    selection_mode: Option<SelectionMode>,

    /// JSON catalog file to use instead of the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log output format on stderr (text | json).
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the catalog's products.
    Catalog,
    /// Price a seat count without starting the wizard.
    Price {
        /// Seat count as typed; non-numeric input counts as 0.
        #[arg(long, allow_hyphen_values = true)]
        seats: String,

        #[arg(long, default_value = "monthly")]
        cycle: BillingCycle,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConsoleConfig::from_env()?;
    if let Some(mode) = cli.selection_mode {
        config.selection_mode = mode;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    quotekit_observability::init(config.log_format);

    let catalog = config.load_catalog().context("loading catalog")?;

    match cli.command {
        Some(Commands::Catalog) => {
            print!("{}", render::catalog_listing(&catalog));
        }
        Some(Commands::Price { seats, cycle }) => {
            let seats = parse_seat_count(&seats);
            println!(
                "{seats} users at ${} per user: ${} {}",
                per_seat_rate(cycle),
                price(seats, cycle),
                cycle.amount_suffix()
            );
        }
        None => {
            let session_id = SessionId::new();
            tracing::info!(
                session_id = %session_id,
                selection_mode = ?config.selection_mode,
                "quote session started"
            );

            let mut app = ConsoleApp::new(session_id, Arc::new(catalog), config.selection_mode);
            app.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}
