//! Program loading.

pub mod loader;
