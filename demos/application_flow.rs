//! Application flow example.
//!
//! Walks an applicant through the checks the site runs before an
//! application is recorded: product limits, eligibility, simulation and
//! the final snapshot.

use loan_simulator::config::SimulatorConfig;
use loan_simulator::core::application::ApplicationSnapshot;
use loan_simulator::core::format::format_currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn apply(config: &SimulatorConfig, income: Decimal, amount: Decimal, term: u32) {
    println!(
        "Applicant earning {} asks for {} over {} months",
        format_currency(income),
        format_currency(amount),
        term
    );

    if let Err(errors) = config.limits.validate(amount, term) {
        println!("  ✗ rejected by the form: {}\n", errors);
        return;
    }

    let decision = config.eligibility.check(income, amount);
    if !decision.is_eligible() {
        println!("  ✗ {}\n", decision);
        return;
    }

    match config.engine().simulate(amount, term) {
        Ok(simulation) => {
            let snapshot = ApplicationSnapshot::from_simulation(&simulation);
            println!(
                "  ✓ application {} recorded: {} per month, {} in total\n",
                snapshot.reference(),
                format_currency(snapshot.monthly_payment()),
                format_currency(snapshot.total_payment())
            );
        }
        Err(e) => println!("  ✗ simulation failed: {}\n", e),
    }
}

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  loan-simulator: Application Flow        ║");
    println!("╚══════════════════════════════════════════╝\n");

    let config = SimulatorConfig::default();

    apply(&config, dec!(250_000), dec!(1_500_000), 36);
    apply(&config, dec!(120_000), dec!(200_000), 12);
    apply(&config, dec!(200_000), dec!(2_500_000), 24);
    apply(&config, dec!(300_000), dec!(5_000), 6);
}
