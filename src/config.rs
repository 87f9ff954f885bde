use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CYCLE_CAP: u64 = 10_000;
const DEFAULT_MEMORY_WORDS: usize = 32;

/// Rejected values in the `[state]` section.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial register index {index} is outside 0-31")]
    RegisterIndex { index: usize },

    #[error("initial memory address {addr} is unaligned or outside the {size}-byte data memory")]
    MemoryAddress { addr: i64, size: i64 },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub state: StateConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-cycle stage activity on stderr.
    #[serde(default)]
    pub trace: bool,

    /// Watchdog: abandon the run after this many cycles.
    #[serde(default = "default_cycle_cap")]
    pub cycle_cap: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            cycle_cap: DEFAULT_CYCLE_CAP,
        }
    }
}

/// Initial architectural state.
///
/// The register file and data memory are seeded with a fill value and
/// then patched with per-cell overrides, in that order.
#[derive(Debug, Deserialize)]
pub struct StateConfig {
    /// Value every register except `$0` starts with.
    #[serde(default)]
    pub register_fill: i64,

    /// Value every data memory word starts with.
    #[serde(default)]
    pub memory_fill: i64,

    /// Size of data memory in words.
    #[serde(default = "default_memory_words")]
    pub memory_words: usize,

    /// Per-register overrides applied after the fill.
    #[serde(default)]
    pub registers: Vec<RegisterInit>,

    /// Per-word overrides applied after the fill.
    #[serde(default)]
    pub memory: Vec<MemoryInit>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            register_fill: 0,
            memory_fill: 0,
            memory_words: DEFAULT_MEMORY_WORDS,
            registers: Vec::new(),
            memory: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterInit {
    pub index: usize,
    pub value: i64,
}

#[derive(Debug, Deserialize)]
pub struct MemoryInit {
    /// Byte address; must be word-aligned.
    pub address: i64,
    pub value: i64,
}

fn default_cycle_cap() -> u64 {
    DEFAULT_CYCLE_CAP
}

fn default_memory_words() -> usize {
    DEFAULT_MEMORY_WORDS
}
