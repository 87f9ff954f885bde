//! Data hazard detection and operand forwarding.
//!
//! Read-after-write hazards are resolved by forwarding whenever the
//! produced value already exists somewhere in the pipeline, and by
//! stalling in decode when it does not: behind a load, whose word exists
//! only after the memory stage, and ahead of a branch, which consumes
//! its operands in execute before a producer's result reaches either
//! forwarding position.

use crate::core::pipeline::latches::{ExMemBundle, MemWbBundle};
use crate::isa::{Instruction, Opcode};

/// Reason decode refused to issue an instruction this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hazard {
    /// The instruction one ahead is a load producing a source register.
    LoadUse,
    /// A branch comparison operand is still being produced.
    BranchData,
}

/// Pipeline position an operand was forwarded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// Result of the instruction that executed last cycle.
    ExMem,
    /// Result retiring through write-back this cycle.
    MemWb,
}

/// Decides whether `inst`, sitting in decode, must stall this cycle.
///
/// `executed` is the instruction one ahead of `inst` (it went through
/// execute this cycle); `accessed` is the one two ahead (it went through
/// memory this cycle). The decision is re-evaluated from scratch every
/// cycle, so a stalled instruction re-checks against whatever has since
/// advanced.
pub fn detect_hazard(
    inst: &Instruction,
    executed: Option<&ExMemBundle>,
    accessed: Option<&MemWbBundle>,
) -> Option<Hazard> {
    let needs = |dest: Option<usize>| -> bool {
        match dest {
            Some(0) | None => false,
            Some(d) => d == inst.rs || (inst.reads_rt() && d == inst.rt),
        }
    };

    if inst.opcode == Opcode::Beq {
        // One stall behind any register-writing producer, a second behind
        // a load whose word arrives only at the end of this cycle.
        if executed.map_or(false, |b| b.ctrl.reg_write && needs(b.dest)) {
            return Some(Hazard::BranchData);
        }
        if accessed.map_or(false, |b| b.ctrl.mem_read && needs(b.dest)) {
            return Some(Hazard::BranchData);
        }
    }

    if executed.map_or(false, |b| b.ctrl.mem_read && needs(b.dest)) {
        return Some(Hazard::LoadUse);
    }

    None
}

/// Picks the freshest available value for a source register.
///
/// `in_mem` holds the result of the instruction that executed last cycle
/// (now sitting in the memory stage); `retiring` holds the instruction
/// going through write-back this cycle. The younger producer wins when
/// both match. Loads cannot supply a value from the `in_mem` position:
/// their word does not exist until the memory stage has finished.
/// Register `$0` is never forwarded.
pub fn forward_operand(
    reg: usize,
    reg_val: i64,
    in_mem: Option<&MemWbBundle>,
    retiring: Option<&MemWbBundle>,
) -> (i64, Option<ForwardSource>) {
    if reg == 0 {
        return (0, None);
    }

    if let Some(b) = in_mem {
        if b.ctrl.reg_write && !b.ctrl.mem_read && b.dest == Some(reg) {
            return (b.alu_result, Some(ForwardSource::ExMem));
        }
    }

    if let Some(b) = retiring {
        if b.ctrl.reg_write && b.dest == Some(reg) {
            let val = if b.ctrl.mem_to_reg {
                b.loaded_value
            } else {
                b.alu_result
            };
            return (val, Some(ForwardSource::MemWb));
        }
    }

    (reg_val, None)
}
