//! Pipeline simulator CLI.
//!
//! Loads an assembly program, runs it through the five-stage pipeline
//! model, and reports the final architectural state and run statistics.

use clap::Parser;
use std::{fs, process};

use pipesim::common::error::RunOutcome;
use pipesim::config::Config;
use pipesim::core::Cpu;
use pipesim::sim::loader;

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Five-stage pipeline simulator")]
struct Args {
    /// Assembly program to simulate.
    #[arg(short, long)]
    file: String,

    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Emit per-cycle pipeline occupancy, overriding the config.
    #[arg(long)]
    trace: bool,

    /// Print the final state and statistics as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config: Config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error: cannot read config {}: {}", path, e);
                process::exit(1);
            });
            toml::from_str(&content).unwrap_or_else(|e| {
                eprintln!("Error: cannot parse config {}: {}", path, e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    let source = fs::read_to_string(&args.file).unwrap_or_else(|e| {
        eprintln!("Error: cannot read program {}: {}", args.file, e);
        process::exit(1);
    });
    let program = loader::parse_program(&source).unwrap_or_else(|e| {
        eprintln!("Error: {}: {}", args.file, e);
        process::exit(1);
    });

    let mut cpu = Cpu::new(program, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let trace = args.trace || config.general.trace;
    cpu.trace = trace;

    if !args.json {
        println!("Global Configuration");
        println!("--------------------");
        println!("  Program:     {}", args.file);
        println!("  Trace:       {}", trace);
        println!("  Cycle Cap:   {}", config.general.cycle_cap);
        println!("  Data Memory: {} words", config.state.memory_words);
        println!("--------------------");
    }

    let outcome = match cpu.run_with(|snapshot| {
        if trace {
            println!("{}", snapshot);
        }
    }) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("\n[!] FATAL: {}", e);
            cpu.dump_state();
            cpu.stats.print();
            process::exit(1);
        }
    };

    if args.json {
        let doc = serde_json::json!({
            "outcome": match outcome {
                RunOutcome::Completed { .. } => "completed",
                RunOutcome::Overrun { .. } => "overrun",
            },
            "cycles": cpu.stats.cycles,
            "instructions": cpu.stats.instructions_retired,
            "stalls": cpu.stats.total_stalls(),
            "registers": cpu.registers().snapshot(),
            "memory": cpu.memory().words(),
        });
        match serde_json::to_string_pretty(&doc) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: cannot serialize final state: {}", e);
                process::exit(1);
            }
        }
        if matches!(outcome, RunOutcome::Overrun { .. }) {
            process::exit(2);
        }
        return;
    }

    match outcome {
        RunOutcome::Completed { cycles, stalls } => {
            println!(
                "\n[*] Completed in {} cycles ({} stall{})",
                cycles,
                stalls,
                if stalls == 1 { "" } else { "s" }
            );
            cpu.dump_state();
            cpu.stats.print();
        }
        RunOutcome::Overrun { cap } => {
            eprintln!(
                "\n[!] Watchdog: cycle cap {} reached before the pipeline drained",
                cap
            );
            cpu.dump_state();
            cpu.stats.print();
            process::exit(2);
        }
    }
}
