//! # loan-simulator
//!
//! Personal loan simulation engine for peso-denominated consumer loans.
//!
//! Given a principal and a term in months, the engine derives an annual
//! rate from a tiered policy, computes the fixed installment with the
//! annuity formula and expands the full amortization schedule.
//!
//! ## Architecture
//!
//! - **core** — Value objects: simulation, payment rows, application snapshot, formatting
//! - **engine** — Rate policy, annuity payment, schedule generation
//! - **policy** — Product limits and eligibility pre-check applied by callers
//! - **config** — JSON configuration for policies and presentation

pub mod config;
pub mod core;
pub mod engine;
pub mod policy;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::application::{ApplicationSnapshot, ApplicationStatus};
    pub use crate::core::payment::Payment;
    pub use crate::core::simulation::{LoanSimulation, SchedulePage};
    pub use crate::engine::rate::RatePolicy;
    pub use crate::engine::{derive_interest_rate, simulate_loan, LoanSimulationEngine, SimulationError};
    pub use crate::policy::eligibility::{EligibilityDecision, EligibilityPolicy};
    pub use crate::policy::limits::{ProductLimits, ValidationErrors};
}
