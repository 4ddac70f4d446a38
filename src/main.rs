//! loan-simulator CLI
//!
//! Simulate personal loans from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Summary plus the first page of the payment calendar
//! loan-simulator simulate --amount 100000 --term 12
//!
//! # Full schedule as JSON, anchored on a fixed date
//! loan-simulator --format json simulate --amount 100000 --term 12 --start 2026-10-16
//!
//! # Rate only
//! loan-simulator rate --amount 500000 --term 36
//!
//! # Eligibility pre-check
//! loan-simulator eligibility --income 200000 --amount 1500000
//!
//! # Snapshot an application for the simulated terms
//! loan-simulator apply --amount 250000 --term 24
//! ```

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use loan_simulator::config::SimulatorConfig;
use loan_simulator::core::application::ApplicationSnapshot;
use loan_simulator::core::format::format_percentage;
use loan_simulator::core::simulation::{LoanSimulation, SchedulePage};
use log::info;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Personal loan simulator: tiered rates, amortization schedules, eligibility
#[derive(Parser)]
#[command(name = "loan-simulator", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// JSON configuration file overriding the product policies
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a loan and print its summary and payment calendar
    Simulate(SimulateArgs),
    /// Print the annual rate for an amount and term
    Rate {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        term: u32,
    },
    /// Run the eligibility pre-check
    Eligibility {
        /// Declared monthly income
        #[arg(long)]
        income: Decimal,
        /// Requested loan amount
        #[arg(long)]
        amount: Decimal,
    },
    /// Check an amount and term against the product limits
    Validate {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        term: u32,
    },
    /// Simulate a loan and snapshot it as a pending application
    Apply {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        term: u32,
    },
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long)]
    amount: Decimal,
    #[arg(long)]
    term: u32,
    /// Anchor date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Calendar page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Installments per page; overrides the configured value
    #[arg(long)]
    per_page: Option<usize>,
    /// Skip the product amount/term limits
    #[arg(long)]
    no_limits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn print_json(value: &impl serde::Serialize) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The 1-based calendar `page`, or an error naming the available range.
fn schedule_page(
    simulation: &LoanSimulation,
    page: usize,
    per_page: usize,
) -> Result<SchedulePage<'_>, String> {
    page.checked_sub(1)
        .and_then(|index| simulation.page(index, per_page))
        .ok_or_else(|| {
            format!(
                "page {} out of range ({} pages of {})",
                page,
                simulation.page_count(per_page),
                per_page
            )
        })
}

fn cmd_simulate(config: &SimulatorConfig, format: OutputFormat, args: SimulateArgs) -> CliResult {
    if !args.no_limits {
        config.limits.validate(args.amount, args.term)?;
    }

    let engine = config.engine();
    let simulation = match args.start {
        Some(start) => engine.simulate_from(args.amount, args.term, start)?,
        None => engine.simulate(args.amount, args.term)?,
    };
    info!(
        "simulation ready: {} installments at {}",
        simulation.term(),
        format_percentage(simulation.interest_rate())
    );

    match format {
        OutputFormat::Json => print_json(&simulation),
        OutputFormat::Text => {
            let per_page = args.per_page.unwrap_or(config.per_page);
            let page = schedule_page(&simulation, args.page, per_page)?;
            println!("{}", simulation);
            println!("{}", page);
            Ok(())
        }
    }
}

fn cmd_rate(config: &SimulatorConfig, format: OutputFormat, amount: Decimal, term: u32) -> CliResult {
    let rate = config.engine().interest_rate(amount, term);
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "amount": amount,
            "term": term,
            "interest_rate": rate,
        })),
        OutputFormat::Text => {
            println!("{} annual", format_percentage(rate));
            Ok(())
        }
    }
}

fn cmd_eligibility(
    config: &SimulatorConfig,
    format: OutputFormat,
    income: Decimal,
    amount: Decimal,
) -> CliResult {
    let decision = config.eligibility.check(income, amount);
    match format {
        OutputFormat::Json => print_json(&decision),
        OutputFormat::Text => {
            println!("{}", decision);
            Ok(())
        }
    }
}

fn cmd_validate(config: &SimulatorConfig, format: OutputFormat, amount: Decimal, term: u32) -> CliResult {
    let result = config.limits.validate(amount, term);
    if format == OutputFormat::Json {
        let errors = result.as_ref().err().cloned().unwrap_or_default();
        print_json(&serde_json::json!({
            "valid": result.is_ok(),
            "errors": errors,
        }))?;
    } else if result.is_ok() {
        println!("ok");
    }
    result.map_err(Into::into)
}

fn cmd_apply(config: &SimulatorConfig, format: OutputFormat, amount: Decimal, term: u32) -> CliResult {
    config.limits.validate(amount, term)?;
    let simulation = config.engine().simulate(amount, term)?;
    let snapshot = ApplicationSnapshot::from_simulation(&simulation);
    info!("application {} created as {}", snapshot.id(), snapshot.reference());

    match format {
        OutputFormat::Json => print_json(&snapshot),
        OutputFormat::Text => {
            println!("Application {} ({})", snapshot.reference(), snapshot.status());
            println!("{}", simulation);
            Ok(())
        }
    }
}

fn run(cli: Cli) -> CliResult {
    let config = match &cli.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };

    match cli.command {
        Commands::Simulate(args) => cmd_simulate(&config, cli.format, args),
        Commands::Rate { amount, term } => cmd_rate(&config, cli.format, amount, term),
        Commands::Eligibility { income, amount } => {
            cmd_eligibility(&config, cli.format, income, amount)
        }
        Commands::Validate { amount, term } => cmd_validate(&config, cli.format, amount, term),
        Commands::Apply { amount, term } => cmd_apply(&config, cli.format, amount, term),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
