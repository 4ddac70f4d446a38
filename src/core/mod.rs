pub mod application;
pub mod currency;
pub mod format;
pub mod payment;
pub mod simulation;
