use chrono::NaiveDate;
use loan_simulator::core::simulation::LoanSimulation;
use loan_simulator::engine::rate::RatePolicy;
use loan_simulator::engine::{derive_interest_rate, LoanSimulationEngine};
use loan_simulator::policy::eligibility::EligibilityPolicy;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amounts across the product range, in whole pesos.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (10_000u64..=2_500_000u64).prop_map(Decimal::from)
}

fn arb_term() -> impl Strategy<Value = u32> {
    1u32..=60
}

fn simulate(amount: Decimal, term: u32) -> LoanSimulation {
    LoanSimulationEngine::default()
        .simulate_from(amount, term, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
        .unwrap()
}

proptest! {
    // ===================================================================
    // INVARIANT 1: One installment per month, numbered 1..=term.
    // ===================================================================
    #[test]
    fn schedule_has_one_entry_per_month(amount in arb_amount(), term in arb_term()) {
        let sim = simulate(amount, term);
        prop_assert_eq!(sim.payments().len(), term as usize);
        for (i, payment) in sim.payments().iter().enumerate() {
            prop_assert_eq!(payment.number as usize, i + 1);
        }
    }

    // ===================================================================
    // INVARIANT 2: Principal repaid sums to the amount borrowed.
    //
    // Tolerance is one peso per installment, the worst case allowed.
    // ===================================================================
    #[test]
    fn principal_sums_to_amount(amount in arb_amount(), term in arb_term()) {
        let sim = simulate(amount, term);
        let repaid: Decimal = sim.payments().iter().map(|p| p.principal).sum();
        prop_assert!(
            (repaid - amount).abs() <= Decimal::from(term),
            "repaid {} vs amount {}",
            repaid,
            amount
        );
    }

    // ===================================================================
    // INVARIANT 3: The loan is fully repaid.
    // ===================================================================
    #[test]
    fn final_balance_is_zero(amount in arb_amount(), term in arb_term()) {
        let sim = simulate(amount, term);
        let last = sim.payments().last().unwrap();
        prop_assert!(last.balance < dec!(0.01), "final balance {}", last.balance);
    }

    // ===================================================================
    // INVARIANT 4: Balance strictly decreases, except a final floor at 0.
    // ===================================================================
    #[test]
    fn balance_strictly_decreases(amount in arb_amount(), term in arb_term()) {
        let sim = simulate(amount, term);
        let mut previous = amount;
        for payment in sim.payments() {
            prop_assert!(payment.balance >= Decimal::ZERO);
            prop_assert!(
                payment.balance < previous || payment.balance.is_zero(),
                "balance {} after {}",
                payment.balance,
                previous
            );
            previous = payment.balance;
        }
    }

    // ===================================================================
    // INVARIANT 5: Every installment is the same and splits exactly.
    // ===================================================================
    #[test]
    fn installments_are_level(amount in arb_amount(), term in arb_term()) {
        let sim = simulate(amount, term);
        for payment in sim.payments() {
            prop_assert_eq!(payment.total, sim.monthly_payment());
            prop_assert!(payment.is_balanced());
        }
    }

    // ===================================================================
    // INVARIANT 6: Totals are consistent with the installment.
    // ===================================================================
    #[test]
    fn totals_are_consistent(amount in arb_amount(), term in arb_term()) {
        let sim = simulate(amount, term);
        prop_assert_eq!(sim.total_payment(), sim.monthly_payment() * Decimal::from(term));
        prop_assert_eq!(sim.total_interest(), sim.total_payment() - amount);
        prop_assert!(sim.total_interest() > Decimal::ZERO);
    }

    // ===================================================================
    // INVARIANT 7: The rate never drops below the 30% floor and stays
    // within base − largest discount .. base + largest surcharge.
    // ===================================================================
    #[test]
    fn rate_within_policy_bounds(amount in 1u64..100_000_000u64, term in 1u32..1_000) {
        let rate = derive_interest_rate(Decimal::from(amount), term);
        prop_assert!(rate >= dec!(30));
        prop_assert!(rate >= dec!(73) && rate <= dec!(91));
    }

    // ===================================================================
    // INVARIANT 8: Floor holds even for aggressive policies.
    // ===================================================================
    #[test]
    fn floor_holds_for_any_base(base in 0u32..200, amount in arb_amount(), term in arb_term()) {
        let policy = RatePolicy { base_rate: Decimal::from(base), ..Default::default() };
        prop_assert!(policy.rate(amount, term) >= policy.floor_rate);
    }

    // ===================================================================
    // INVARIANT 9: Larger amounts never pay a higher rate at equal term;
    // longer terms never pay a lower rate at equal amount.
    // ===================================================================
    #[test]
    fn rate_is_monotonic(a in arb_amount(), b in arb_amount(), s in arb_term(), t in arb_term()) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let (short, long) = if s <= t { (s, t) } else { (t, s) };
        prop_assert!(derive_interest_rate(large, short) <= derive_interest_rate(small, short));
        prop_assert!(derive_interest_rate(small, long) >= derive_interest_rate(small, short));
    }

    // ===================================================================
    // INVARIANT 10: Same inputs and start date give the same simulation.
    // ===================================================================
    #[test]
    fn simulation_is_deterministic(amount in arb_amount(), term in arb_term()) {
        prop_assert_eq!(simulate(amount, term), simulate(amount, term));
    }

    // ===================================================================
    // INVARIANT 11: Schedule pages partition the schedule.
    // ===================================================================
    #[test]
    fn pages_partition_schedule(term in arb_term(), per_page in 1usize..=12) {
        let sim = simulate(dec!(100_000), term);
        let mut seen = 0usize;
        for index in 0..sim.page_count(per_page) {
            let page = sim.page(index, per_page).unwrap();
            prop_assert!(!page.payments.is_empty());
            prop_assert!(page.payments.len() <= per_page);
            prop_assert_eq!(page.payments[0].number as usize, seen + 1);
            seen += page.payments.len();
        }
        prop_assert_eq!(seen, term as usize);
        prop_assert!(sim.page(sim.page_count(per_page), per_page).is_none());
    }

    // ===================================================================
    // INVARIANT 12: Eligible applicants satisfy both income rules.
    // ===================================================================
    #[test]
    fn eligibility_matches_rules(income in 0u64..1_000_000u64, amount in arb_amount()) {
        let policy = EligibilityPolicy::default();
        let income = Decimal::from(income);
        let expected = income >= dec!(150_000) && amount <= income * dec!(10);
        prop_assert_eq!(policy.check(income, amount).is_eligible(), expected);
    }
}
