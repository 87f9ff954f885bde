//! The five pipeline stages.
//!
//! Stages run oldest-first within a cycle (write-back down to fetch), so
//! each stage consumes what its upstream neighbor produced in the
//! previous cycle, and a register written back is visible to the same
//! cycle's decode.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod write_back;
