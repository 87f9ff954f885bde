//! End-to-end pipeline timing and architectural-state tests.

use pipesim::common::error::{RunOutcome, SimError};
use pipesim::config::{Config, ConfigError};
use pipesim::core::Cpu;
use pipesim::sim::loader::parse_program;
use pretty_assertions::assert_eq;

/// Builds a core from assembly lines and a TOML configuration snippet.
fn build_cpu(lines: &[&str], config_toml: &str) -> Cpu {
    let program = parse_program(&lines.join("\n")).expect("program should parse");
    let config: Config = toml::from_str(config_toml).expect("config should parse");
    Cpu::new(program, &config).expect("initial state should be valid")
}

#[test]
fn load_use_scenario_stalls_once_and_forwards() {
    let mut cpu = build_cpu(
        &["lw 2 8(0)", "lw 3 16(0)", "add 4 2 3", "sw 4 24(0)"],
        "[state]\nregister_fill = 1\nmemory_fill = 1\n",
    );

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Completed { cycles: 9, stalls: 1 });
    assert_eq!(cpu.stats.stalls_load_use, 1);
    assert_eq!(cpu.registers().read(2), 1);
    assert_eq!(cpu.registers().read(3), 1);
    assert_eq!(cpu.registers().read(4), 2);
    assert_eq!(cpu.memory().read(24).unwrap(), 2);
}

#[test]
fn branch_not_taken_falls_through() {
    let mut cpu = build_cpu(
        &["add 1 2 3", "beq 1 0 2", "add 4 5 6", "sub 7 8 9"],
        "[state]\nregisters = [\
         { index = 2, value = 2 }, { index = 3, value = 3 },\
         { index = 5, value = 2 }, { index = 6, value = 3 },\
         { index = 8, value = 9 }, { index = 9, value = 4 }]\n",
    );

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Completed { cycles: 9, stalls: 1 });
    assert_eq!(cpu.stats.stalls_branch, 1);
    assert_eq!(cpu.stats.instructions_retired, 4, "every instruction retires");
    assert_eq!(cpu.stats.branch_mispredictions, 0);
    assert_eq!(cpu.registers().read(1), 5);
    assert_eq!(cpu.registers().read(4), 5);
    assert_eq!(cpu.registers().read(7), 5);
}

#[test]
fn branch_taken_flushes_wrong_path() {
    // With zero-initialized registers the comparison $1 == $0 holds, so
    // the branch skips both trailing instructions.
    let mut cpu = build_cpu(&["add 1 2 3", "beq 1 0 2", "add 4 5 6", "sub 7 8 9"], "");

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Completed { cycles: 7, stalls: 1 });
    assert_eq!(cpu.stats.instructions_retired, 2, "only add #0 and beq #1 retire");
    assert_eq!(cpu.stats.branch_mispredictions, 1);
    assert_eq!(cpu.stats.squashed, 1, "one wrong-path fetch is squashed");
    assert_eq!(cpu.registers().read(4), 0, "squashed add must not write");
    assert_eq!(cpu.registers().read(7), 0, "never-fetched sub must not write");
    assert_eq!(cpu.pc(), 4);
}

#[test]
fn load_to_branch_costs_two_stalls() {
    let mut cpu = build_cpu(
        &["lw 2 8(0)", "beq 2 3 0"],
        "[state]\nregisters = [{ index = 3, value = 5 }]\nmemory = [{ address = 8, value = 5 }]\n",
    );

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Completed { cycles: 8, stalls: 2 });
    assert_eq!(cpu.stats.stalls_branch, 2);
    assert_eq!(cpu.stats.branch_mispredictions, 1, "the loaded word makes the branch taken");
}

#[test]
fn cycle_count_conservation_without_hazards() {
    let mut cpu = build_cpu(
        &["add 1 0 0", "add 2 0 0", "add 3 0 0", "add 4 0 0", "add 5 0 0"],
        "",
    );

    let outcome = cpu.run().expect("no faults");

    // instructions + pipeline fill + stalls
    assert_eq!(outcome, RunOutcome::Completed { cycles: 5 + 4, stalls: 0 });
}

#[test]
fn cycle_count_conservation_with_a_stall() {
    let mut cpu = build_cpu(
        &["lw 1 0(0)", "add 2 1 1", "add 3 0 0", "add 4 0 0"],
        "[state]\nmemory = [{ address = 0, value = 6 }]\n",
    );

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Completed { cycles: 4 + 4 + 1, stalls: 1 });
    assert_eq!(cpu.registers().read(2), 12, "load data forwards into the add");
}

#[test]
fn alu_result_forwards_into_store_data() {
    let mut cpu = build_cpu(
        &["add 1 2 3", "sw 1 0(0)"],
        "[state]\nregisters = [{ index = 2, value = 2 }, { index = 3, value = 3 }]\n",
    );

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Completed { cycles: 6, stalls: 0 });
    assert_eq!(cpu.memory().read(0).unwrap(), 5);
}

#[test]
fn register_zero_is_immutable() {
    let mut cpu = build_cpu(
        &["add 0 1 2", "add 3 0 0"],
        "[state]\nregisters = [{ index = 1, value = 3 }, { index = 2, value = 4 }]\n",
    );

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Completed { cycles: 6, stalls: 0 });
    assert_eq!(cpu.registers().read(0), 0);
    assert_eq!(cpu.registers().read(3), 0, "$0 reads as zero even mid-pipeline");
}

#[test]
fn watchdog_stops_an_infinite_loop() {
    let mut cpu = build_cpu(&["beq 0 0 -1"], "[general]\ncycle_cap = 50\n");

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Overrun { cap: 50 });
    assert_eq!(cpu.stats.cycles, 50);
}

#[test]
fn misaligned_address_faults() {
    let mut cpu = build_cpu(&["lw 1 3(0)"], "");

    let err = cpu.run().unwrap_err();

    assert_eq!(
        err,
        SimError::MisalignedAddress {
            cycle: 4,
            index: 0,
            addr: 3,
        }
    );
}

#[test]
fn out_of_range_address_faults() {
    // Default data memory is 32 words (byte addresses 0..128).
    let mut cpu = build_cpu(&["sw 1 128(0)"], "");

    let err = cpu.run().unwrap_err();

    assert_eq!(
        err,
        SimError::AddressOutOfRange {
            cycle: 4,
            index: 0,
            addr: 128,
        }
    );
}

#[test]
fn latches_fill_front_to_back() {
    let mut cpu = build_cpu(&["add 1 0 0", "add 2 0 0", "add 3 0 0", "add 4 0 0"], "");

    assert_eq!(cpu.latch_occupancy(), [false, false, false, false]);
    cpu.tick().expect("no faults");
    assert_eq!(cpu.latch_occupancy(), [true, false, false, false]);
    cpu.tick().expect("no faults");
    assert_eq!(cpu.latch_occupancy(), [true, true, false, false]);
    cpu.tick().expect("no faults");
    assert_eq!(cpu.latch_occupancy(), [true, true, true, false]);
    cpu.tick().expect("no faults");
    assert_eq!(cpu.latch_occupancy(), [true, true, true, true]);
}

#[test]
fn each_instruction_occupies_one_stage_per_cycle() {
    let mut cpu = build_cpu(
        &["lw 2 8(0)", "lw 3 16(0)", "add 4 2 3", "sw 4 24(0)"],
        "[state]\nregister_fill = 1\nmemory_fill = 1\n",
    );

    let mut snapshots = Vec::new();
    cpu.run_with(|snap| snapshots.push(*snap)).expect("no faults");

    assert_eq!(snapshots.len(), 9);
    for snap in &snapshots {
        let mut indices = snap.occupied_indices();
        let total = indices.len();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(
            total,
            indices.len(),
            "an instruction appeared in two stages in cycle {}",
            snap.cycle
        );
    }
}

#[test]
fn stalled_instruction_is_reported_in_decode() {
    let mut cpu = build_cpu(
        &["lw 2 8(0)", "lw 3 16(0)", "add 4 2 3", "sw 4 24(0)"],
        "[state]\nregister_fill = 1\nmemory_fill = 1\n",
    );

    let mut stalled_cycles = Vec::new();
    cpu.run_with(|snap| {
        if snap.decode.map_or(false, |v| v.stalled) {
            stalled_cycles.push(snap.cycle);
        }
    })
    .expect("no faults");

    assert_eq!(stalled_cycles, vec![4], "add #2 holds in decode for one cycle");
}

#[test]
fn invalid_initial_register_is_rejected() {
    let program = parse_program("add 1 2 3").expect("should parse");
    let config: Config =
        toml::from_str("[state]\nregisters = [{ index = 40, value = 1 }]\n").expect("should parse");

    let err = Cpu::new(program, &config).unwrap_err();

    assert_eq!(err, ConfigError::RegisterIndex { index: 40 });
}

#[test]
fn invalid_initial_memory_address_is_rejected() {
    let program = parse_program("add 1 2 3").expect("should parse");
    let config: Config =
        toml::from_str("[state]\nmemory = [{ address = 6, value = 1 }]\n").expect("should parse");

    let err = Cpu::new(program, &config).unwrap_err();

    assert_eq!(err, ConfigError::MemoryAddress { addr: 6, size: 128 });
}

#[test]
fn empty_program_finishes_immediately() {
    let mut cpu = build_cpu(&[], "");

    let outcome = cpu.run().expect("no faults");

    assert_eq!(outcome, RunOutcome::Completed { cycles: 0, stalls: 0 });
    assert_eq!(cpu.stats.instructions_retired, 0);
}

#[test]
fn backward_branch_loops_until_counter_drains() {
    // $1 counts down via $2 = -1; the loop body runs until $1 == $0.
    //   #0 add 1 1 2     ($1 -= 1)
    //   #1 beq 1 0 1     (exit when zero)
    //   #2 beq 0 0 -3    (back to #0)
    let mut cpu = build_cpu(
        &["add 1 1 2", "beq 1 0 1", "beq 0 0 -3"],
        "[state]\nregisters = [{ index = 1, value = 2 }, { index = 2, value = -1 }]\n",
    );

    let outcome = cpu.run().expect("no faults");

    assert_eq!(cpu.registers().read(1), 0);
    assert_eq!(cpu.stats.branch_mispredictions, 2, "one backward jump, one exit");
    match outcome {
        RunOutcome::Completed { stalls, .. } => {
            assert_eq!(cpu.stats.stalls_branch, stalls, "each beq #1 pass stalls behind add #0");
        }
        RunOutcome::Overrun { cap } => panic!("loop should drain before the {cap}-cycle cap"),
    }
}
