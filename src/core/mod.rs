//! Processor core: pipeline stages, latches, and architectural state.

pub mod arch;
pub mod control;
pub mod cpu;
pub mod pipeline;
pub mod stages;
pub mod trace;

pub use cpu::Cpu;
