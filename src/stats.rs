//! Run statistics collection and reporting.
//!
//! Tracks cycle counts, the retired instruction mix, stall counts, and
//! branch behavior over a simulation run.

/// Counters accumulated over a simulation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimStats {
    pub cycles: u64,
    pub instructions_retired: u64,

    pub inst_alu: u64,
    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_branch: u64,

    pub stalls_load_use: u64,
    pub stalls_branch: u64,

    pub branch_predictions: u64,
    pub branch_mispredictions: u64,

    /// Wrong-path instructions squashed by a taken branch.
    pub squashed: u64,
}

impl SimStats {
    /// Total cycles lost to decode stalls.
    pub fn total_stalls(&self) -> u64 {
        self.stalls_load_use + self.stalls_branch
    }

    /// Prints a formatted summary of the run.
    pub fn print(&self) {
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };

        let ipc = self.instructions_retired as f64 / cyc as f64;
        let cpi = cyc as f64 / instr as f64;
        let total_inst = instr as f64;

        println!("\n==================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==================================================");
        println!("sim_cycles           {}", self.cycles);
        println!("sim_insts            {}", self.instructions_retired);
        println!("sim_ipc              {:.4}", ipc);
        println!("sim_cpi              {:.4}", cpi);
        println!("--------------------------------------------------");
        println!("INSTRUCTION MIX");
        println!(
            "  op.alu             {} ({:.2}%)",
            self.inst_alu,
            (self.inst_alu as f64 / total_inst) * 100.0
        );
        println!(
            "  op.load            {} ({:.2}%)",
            self.inst_load,
            (self.inst_load as f64 / total_inst) * 100.0
        );
        println!(
            "  op.store           {} ({:.2}%)",
            self.inst_store,
            (self.inst_store as f64 / total_inst) * 100.0
        );
        println!(
            "  op.branch          {} ({:.2}%)",
            self.inst_branch,
            (self.inst_branch as f64 / total_inst) * 100.0
        );
        println!("--------------------------------------------------");
        println!("STALLS");
        println!(
            "  stalls.load_use    {} ({:.2}%)",
            self.stalls_load_use,
            (self.stalls_load_use as f64 / cyc as f64) * 100.0
        );
        println!(
            "  stalls.branch_data {} ({:.2}%)",
            self.stalls_branch,
            (self.stalls_branch as f64 / cyc as f64) * 100.0
        );
        println!("--------------------------------------------------");
        println!("BRANCHES");
        let bp_total = self.branch_predictions;
        let bp_miss = self.branch_mispredictions;
        let bp_acc = if bp_total > 0 {
            100.0 * (1.0 - (bp_miss as f64 / bp_total as f64))
        } else {
            0.0
        };
        println!("  bp.predictions     {}", bp_total);
        println!("  bp.mispredicts     {}", bp_miss);
        println!("  bp.accuracy        {:.2}%", bp_acc);
        println!("  squashed           {}", self.squashed);
        println!("==================================================");
    }
}
