// GalleyCheck CLI - cart reconciliation from the command line

mod exit_codes;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "galleycheck")]
#[command(about = "Reconcile catering cart scans against the packing plan")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation over a plan CSV and a scan-batch JSON file
    #[command(after_help = "\
Examples:
  galleycheck run --plan plan.csv --scans scans.json
  galleycheck run --plan plan.csv --scans scans.json --json
  galleycheck run --plan plan.csv --scans scans.json --config recon.toml --output report.json")]
    Run {
        /// Plan CSV (cart_id, cart_label, sku, unit_weight_g, required_quantity, weight_tolerance_g)
        #[arg(long)]
        plan: PathBuf,

        /// Scan batch: JSON array of scanned carts
        #[arg(long)]
        scans: PathBuf,

        /// Optional TOML config (tare, solver bounds); defaults apply without it
        #[arg(long, env = "GALLEYCHECK_CONFIG")]
        config: Option<PathBuf>,

        /// Print the JSON report to stdout instead of just the stderr summary
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  galleycheck validate recon.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { plan, scans, config, json, output } => {
            recon::cmd_run(plan, scans, config, json, output)
        }
        Commands::Validate { config } => recon::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
