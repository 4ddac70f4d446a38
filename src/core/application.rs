use crate::core::simulation::LoanSimulation;
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Review state of a submitted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// The loan terms a visitor applied for, frozen at submission time.
///
/// Built from the simulation on screen when the application was sent; later
/// simulations never alter it.
///
/// # Examples
///
/// ```
/// use loan_simulator::core::application::{ApplicationSnapshot, ApplicationStatus};
/// use loan_simulator::engine::simulate_loan;
/// use rust_decimal_macros::dec;
///
/// let simulation = simulate_loan(dec!(100000), 12).unwrap();
/// let snapshot = ApplicationSnapshot::from_simulation(&simulation);
///
/// assert_eq!(snapshot.status(), ApplicationStatus::Pending);
/// assert_eq!(snapshot.monthly_payment(), simulation.monthly_payment());
/// assert!(snapshot.reference().starts_with("LP-"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSnapshot {
    id: Uuid,
    /// Confirmation code shown to the applicant, `LP-` plus six digits.
    reference: String,
    status: ApplicationStatus,
    amount: Decimal,
    term: u32,
    monthly_payment: Decimal,
    interest_rate: Decimal,
    total_interest: Decimal,
    total_payment: Decimal,
    start_date: NaiveDate,
    created_at: DateTime<Utc>,
}

/// Random confirmation code in `LP-100000..=LP-999999`.
pub fn generate_reference() -> String {
    let number: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    format!("LP-{}", number)
}

impl ApplicationSnapshot {
    /// Snapshot the terms of `simulation` as a new pending application.
    pub fn from_simulation(simulation: &LoanSimulation) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference: generate_reference(),
            status: ApplicationStatus::Pending,
            amount: simulation.amount(),
            term: simulation.term(),
            monthly_payment: simulation.monthly_payment(),
            interest_rate: simulation.interest_rate(),
            total_interest: simulation.total_interest(),
            total_payment: simulation.total_payment(),
            start_date: simulation.start_date(),
            created_at: Utc::now(),
        }
    }

    /// Same application under a new review status.
    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    pub fn total_payment(&self) -> Decimal {
        self.total_payment
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
