//! Product rules applied around the engine by the calling layer.

pub mod eligibility;
pub mod limits;
