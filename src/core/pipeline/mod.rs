//! Inter-stage latches and hazard resolution.

pub mod hazards;
pub mod latches;
