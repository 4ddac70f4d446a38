//! Basic loan simulation example.
//!
//! Shows how the rate tiers move with amount and term, and prints the
//! payment calendar of a typical loan.

use loan_simulator::core::format::{format_currency, format_percentage, format_term};
use loan_simulator::core::simulation::DEFAULT_PAGE_SIZE;
use loan_simulator::engine::{derive_interest_rate, simulate_loan};
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  loan-simulator: Basic Simulation        ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Scenario 1: Rate tiers ---
    println!("━━━ Scenario 1: Rate Tiers ━━━\n");

    for amount in [dec!(50_000), dec!(100_000), dec!(250_000), dec!(500_000), dec!(1_000_000)] {
        let rates: Vec<String> = [6u32, 12, 24, 36, 48]
            .iter()
            .map(|&term| format_percentage(derive_interest_rate(amount, term)))
            .collect();
        println!("  {:>14}  {}", format_currency(amount), rates.join("  "));
    }

    // --- Scenario 2: Full schedule ---
    println!("\n━━━ Scenario 2: {} over {} ━━━\n", format_currency(dec!(100_000)), format_term(12));

    let simulation = match simulate_loan(dec!(100_000), 12) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("simulation failed: {}", e);
            return;
        }
    };
    println!("{}", simulation);

    for index in 0..simulation.page_count(DEFAULT_PAGE_SIZE) {
        if let Some(page) = simulation.page(index, DEFAULT_PAGE_SIZE) {
            println!("{}", page);
        }
    }
}
