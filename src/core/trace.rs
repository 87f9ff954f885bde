//! Per-cycle pipeline occupancy reporting.

use std::fmt;

use crate::core::control::ControlSignals;
use crate::isa::Opcode;

/// What a single stage held during one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageView {
    pub opcode: Opcode,
    /// Program index of the instruction in the stage.
    pub index: usize,
    /// Control signals, once the instruction has been decoded.
    pub ctrl: Option<ControlSignals>,
    /// The instruction sat in the stage without issuing.
    pub stalled: bool,
}

/// Pipeline occupancy for one completed cycle.
///
/// Empty stages are bubbles. The execute, memory, and write-back cells
/// render the control signals relevant to that stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleSnapshot {
    pub cycle: u64,
    pub fetch: Option<StageView>,
    pub decode: Option<StageView>,
    pub execute: Option<StageView>,
    pub memory: Option<StageView>,
    pub write_back: Option<StageView>,
}

impl CycleSnapshot {
    /// Program indices currently in flight, youngest stage first.
    pub fn occupied_indices(&self) -> Vec<usize> {
        [
            &self.fetch,
            &self.decode,
            &self.execute,
            &self.memory,
            &self.write_back,
        ]
        .iter()
        .filter_map(|view| view.as_ref().map(|v| v.index))
        .collect()
    }
}

fn cell(view: &Option<StageView>, bits: Option<fn(&ControlSignals) -> String>) -> String {
    let Some(v) = view else {
        return "-".to_string();
    };
    let mut s = format!("{} #{}", v.opcode, v.index);
    if let (Some(bits), Some(ctrl)) = (bits, v.ctrl.as_ref()) {
        s.push(' ');
        s.push_str(&bits(ctrl));
    }
    if v.stalled {
        s.push('*');
    }
    s
}

impl fmt::Display for CycleSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycle {:>4} | IF {:<8} | ID {:<9} | EX {:<16} | MEM {:<13} | WB {:<11}",
            self.cycle,
            cell(&self.fetch, None),
            cell(&self.decode, None),
            cell(&self.execute, Some(ControlSignals::ex_bits)),
            cell(&self.memory, Some(ControlSignals::mem_bits)),
            cell(&self.write_back, Some(ControlSignals::wb_bits)),
        )
    }
}
