//! Load-time and run-time error taxonomy.
//!
//! Load errors are raised before the first cycle runs; a program that
//! enters the pipeline can only fail on a data memory access.

use thiserror::Error;

/// A program file was rejected at load time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}: unknown opcode `{mnemonic}`")]
    UnknownOpcode { line: usize, mnemonic: String },

    #[error("line {line}: `{mnemonic}` expects {expected} operands, found {found}")]
    OperandCount {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: register index {index} is outside 0-31")]
    RegisterRange { line: usize, index: i64 },

    #[error("line {line}: malformed operand `{operand}`")]
    MalformedOperand { line: usize, operand: String },

    #[error("line {line}: branch target {target} is outside the program")]
    BranchTarget { line: usize, target: i64 },
}

/// A fault raised while the pipeline was running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("cycle {cycle}: instruction #{index}: address {addr} is not word-aligned")]
    MisalignedAddress { cycle: u64, index: usize, addr: i64 },

    #[error("cycle {cycle}: instruction #{index}: address {addr} is outside data memory")]
    AddressOutOfRange { cycle: u64, index: usize, addr: i64 },
}

/// How a simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every fetched instruction drained from the pipeline.
    Completed { cycles: u64, stalls: u64 },
    /// The watchdog cycle cap fired before the pipeline drained.
    Overrun { cap: u64 },
}
