//! invoice-totals entry point.

use app_core::observability::init_tracing;
use clap::Parser;
use invoice_totals::cli::{read_draft, run, Cli, Outcome};
use invoice_totals::config::TotalsConfig;
use invoice_totals::services::Calculator;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match TotalsConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(1);
        }
    };

    init_tracing(
        &config.common.service_name,
        &config.common.log_level,
        config.common.log_format,
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        percent_base = config.calculator.percent_base.as_str(),
        cap_flat_discount = config.calculator.cap_flat_discount,
        split_tolerance = %config.calculator.split_tolerance,
        "Starting invoice-totals"
    );

    let calculator = Calculator::from(&config.calculator);

    let result = read_draft(cli.draft_path(), std::io::stdin().lock())
        .and_then(|draft| run(&calculator, &draft, cli.submit, std::io::stdout().lock()));

    match result {
        Ok(outcome) => {
            if let Outcome::Rejected(reason) = &outcome {
                eprintln!("{}", reason);
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "invoice-totals failed");
            ExitCode::from(1)
        }
    }
}
