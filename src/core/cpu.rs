use crate::common::error::{RunOutcome, SimError};
use crate::config::{Config, ConfigError};
use crate::core::arch::{DataMemory, RegisterFile};
use crate::core::pipeline::latches::{ExMemBundle, IdExBundle, IfIdBundle, MemWbBundle};
use crate::core::stages;
use crate::core::trace::{CycleSnapshot, StageView};
use crate::isa::Instruction;
use crate::stats::SimStats;

/// The pipelined processor core.
///
/// Owns the architectural state (registers, data memory, program
/// counter), the four inter-stage latches, and the statistics counters.
/// [`Cpu::tick`] advances the machine by exactly one cycle.
#[derive(Debug)]
pub struct Cpu {
    pub(crate) pc: usize,
    pub(crate) program: Vec<Instruction>,
    pub(crate) regs: RegisterFile,
    pub(crate) mem: DataMemory,
    pub(crate) if_id: Option<IfIdBundle>,
    pub(crate) id_ex: Option<IdExBundle>,
    pub(crate) ex_mem: Option<ExMemBundle>,
    pub(crate) mem_wb: Option<MemWbBundle>,
    pub stats: SimStats,
    pub trace: bool,
    cycle_cap: u64,
}

impl Cpu {
    /// Builds a core with the architectural state described by `config`.
    pub fn new(program: Vec<Instruction>, config: &Config) -> Result<Self, ConfigError> {
        let mut regs = RegisterFile::new(config.state.register_fill);
        for init in &config.state.registers {
            if init.index >= 32 {
                return Err(ConfigError::RegisterIndex { index: init.index });
            }
            regs.write(init.index, init.value);
        }

        let mut mem = DataMemory::new(config.state.memory_words, config.state.memory_fill);
        let size = mem.size_bytes();
        for init in &config.state.memory {
            mem.write(init.address, init.value)
                .map_err(|_| ConfigError::MemoryAddress {
                    addr: init.address,
                    size,
                })?;
        }

        Ok(Self {
            pc: 0,
            program,
            regs,
            mem,
            if_id: None,
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            stats: SimStats::default(),
            trace: config.general.trace,
            cycle_cap: config.general.cycle_cap,
        })
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn memory(&self) -> &DataMemory {
        &self.mem
    }

    /// Index of the next instruction to fetch.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Whether the program has fully drained from the pipeline.
    pub fn is_done(&self) -> bool {
        self.pc >= self.program.len()
            && self.if_id.is_none()
            && self.id_ex.is_none()
            && self.ex_mem.is_none()
            && self.mem_wb.is_none()
    }

    /// Occupancy of the four inter-stage latches, fetch side first.
    pub fn latch_occupancy(&self) -> [bool; 4] {
        [
            self.if_id.is_some(),
            self.id_ex.is_some(),
            self.ex_mem.is_some(),
            self.mem_wb.is_some(),
        ]
    }

    /// Advances the machine by one cycle.
    ///
    /// Stages run oldest-first (WB, MEM, EX, ID, IF) so every stage sees
    /// the latch contents its neighbor produced last cycle, and a
    /// register written back this cycle is visible to this cycle's
    /// decode. A taken branch resolved in execute squashes the fetched
    /// wrong-path instruction and suppresses decode and fetch for the
    /// rest of the cycle.
    pub fn tick(&mut self) -> Result<CycleSnapshot, SimError> {
        self.stats.cycles += 1;

        let retiring = stages::write_back::wb_stage(self);
        let accessed = stages::memory::mem_stage(self)?;
        let (execute_view, redirect) =
            stages::execute::execute_stage(self, accessed.as_ref(), retiring.as_ref());

        let memory_view = accessed.as_ref().map(|b| StageView {
            opcode: b.inst.opcode,
            index: b.inst.index,
            ctrl: Some(b.ctrl),
            stalled: false,
        });
        let write_back_view = retiring.as_ref().map(|b| StageView {
            opcode: b.inst.opcode,
            index: b.inst.index,
            ctrl: Some(b.ctrl),
            stalled: false,
        });

        self.mem_wb = accessed;

        let (decode_view, fetch_view) = if let Some(target) = redirect {
            if self.if_id.take().is_some() {
                self.stats.squashed += 1;
            }
            self.pc = target;
            if self.trace {
                eprintln!("--  flush, pc => #{}", target);
            }
            (None, None)
        } else {
            let decode_view = stages::decode::decode_stage(self);
            let fetch_view = stages::fetch::fetch_stage(self);
            (decode_view, fetch_view)
        };

        Ok(CycleSnapshot {
            cycle: self.stats.cycles,
            fetch: fetch_view,
            decode: decode_view,
            execute: execute_view,
            memory: memory_view,
            write_back: write_back_view,
        })
    }

    /// Runs the core until the pipeline drains or the watchdog cycle cap
    /// fires, invoking `on_cycle` after every completed cycle.
    pub fn run_with<F>(&mut self, mut on_cycle: F) -> Result<RunOutcome, SimError>
    where
        F: FnMut(&CycleSnapshot),
    {
        while !self.is_done() {
            if self.stats.cycles >= self.cycle_cap {
                return Ok(RunOutcome::Overrun {
                    cap: self.cycle_cap,
                });
            }
            let snapshot = self.tick()?;
            on_cycle(&snapshot);
        }
        Ok(RunOutcome::Completed {
            cycles: self.stats.cycles,
            stalls: self.stats.total_stalls(),
        })
    }

    /// Runs the core without observing per-cycle snapshots.
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        self.run_with(|_| {})
    }

    /// Prints the architectural state to stdout.
    pub fn dump_state(&self) {
        println!("Registers");
        self.regs.dump();
        println!("Data Memory");
        self.mem.dump();
    }
}
