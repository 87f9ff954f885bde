//! Five-stage pipeline simulator library.
//!
//! This crate implements a cycle-accurate, pedagogical model of a classic
//! five-stage in-order pipeline (Fetch, Decode, Execute, Memory, Write-back)
//! over a five-instruction subset: `add`, `sub`, `lw`, `sw`, and `beq`.
//!
//! # Architecture
//!
//! * **Core**: one instruction per stage, single-entry latches between
//!   stages, bubbles modeled as empty latches.
//! * **Hazards**: operand forwarding from the memory and write-back
//!   positions, load-use and branch-data stalls, predict-not-taken
//!   branches with a flush of wrong-path work on a taken branch.
//! * **Programs**: loaded from assembly text and validated before the
//!   first cycle runs.
//!
//! # Modules
//!
//! * `common`: Shared error and outcome types.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction set definitions.
//! * `sim`: Program loading.
//! * `stats`: Run statistics collection.

/// Shared error and outcome types.
///
/// Provides the load-time and run-time error taxonomy and the terminal
/// outcome of a simulation run.
pub mod common;

/// Configuration system for tracing, the watchdog, and initial state.
///
/// Loads and parses TOML configuration files describing how the register
/// file and data memory are seeded before the first cycle.
pub mod config;

/// CPU core implementation including pipeline stages and hazard logic.
///
/// Implements the five-stage in-order pipeline (Fetch, Decode, Execute,
/// Memory, Write-back), the inter-stage latches, and the architectural
/// state they operate on.
pub mod core;

/// Instruction set definitions.
///
/// Defines the five-opcode instruction subset and the fully decoded
/// instruction representation the pipeline carries.
pub mod isa;

/// Program loading.
///
/// Parses assembly text into validated programs, rejecting malformed
/// lines and out-of-range branch targets before simulation starts.
pub mod sim;

/// Run statistics collection and reporting.
///
/// Tracks cycle counts, instruction mix, stall counts, and branch
/// behavior during simulation.
pub mod stats;
