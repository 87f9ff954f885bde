//! Shared error and outcome types.

pub mod error;
