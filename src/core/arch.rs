//! Architectural state: the register file and data memory.
//!
//! This module enforces the architectural invariant that register `$0` is
//! hardwired to zero, and the memory model of aligned whole-word accesses.

/// Bytes per memory word.
pub const WORD_BYTES: i64 = 4;

/// General-purpose register file.
///
/// Contains 32 registers. Register `$0` is hardwired to zero and cannot
/// be modified.
#[derive(Debug)]
pub struct RegisterFile {
    regs: [i64; 32],
}

impl RegisterFile {
    /// Creates a register file with every register except `$0` set to
    /// `fill`.
    pub fn new(fill: i64) -> Self {
        let mut regs = [fill; 32];
        regs[0] = 0;
        Self { regs }
    }

    /// Reads a register value.
    ///
    /// Register `$0` always returns 0 regardless of storage.
    pub fn read(&self, idx: usize) -> i64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register.
    ///
    /// Writes to register `$0` are silently ignored.
    pub fn write(&mut self, idx: usize, val: i64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Copies the register contents out, e.g. for a final-state report.
    pub fn snapshot(&self) -> Vec<i64> {
        self.regs.to_vec()
    }

    /// Dumps the contents of all registers to stdout, four per line.
    pub fn dump(&self) {
        for i in (0..32).step_by(4) {
            println!(
                "${:<2}={:<12} ${:<2}={:<12} ${:<2}={:<12} ${:<2}={:<12}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1],
                i + 2,
                self.regs[i + 2],
                i + 3,
                self.regs[i + 3]
            );
        }
    }
}

/// Failure modes for a data memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressError {
    /// The address is not a multiple of the word size.
    Misaligned,
    /// The address falls outside the memory array.
    OutOfRange,
}

/// Word-granular data memory with a byte-addressed interface.
///
/// Accesses must be aligned to the 4-byte word size; each word holds a
/// full signed value, mirroring the register width.
#[derive(Debug)]
pub struct DataMemory {
    words: Vec<i64>,
}

impl DataMemory {
    /// Creates a memory of `words` words, each initialized to `fill`.
    pub fn new(words: usize, fill: i64) -> Self {
        Self {
            words: vec![fill; words],
        }
    }

    /// Size of the memory in bytes.
    pub fn size_bytes(&self) -> i64 {
        self.words.len() as i64 * WORD_BYTES
    }

    fn index(&self, addr: i64) -> Result<usize, AddressError> {
        if addr % WORD_BYTES != 0 {
            return Err(AddressError::Misaligned);
        }
        if addr < 0 || addr >= self.size_bytes() {
            return Err(AddressError::OutOfRange);
        }
        Ok((addr / WORD_BYTES) as usize)
    }

    /// Reads the word at byte address `addr`.
    pub fn read(&self, addr: i64) -> Result<i64, AddressError> {
        Ok(self.words[self.index(addr)?])
    }

    /// Writes the word at byte address `addr`.
    pub fn write(&mut self, addr: i64, val: i64) -> Result<(), AddressError> {
        let idx = self.index(addr)?;
        self.words[idx] = val;
        Ok(())
    }

    /// The backing word array, for final-state reports.
    pub fn words(&self) -> &[i64] {
        &self.words
    }

    /// Dumps memory contents to stdout, four words per line.
    pub fn dump(&self) {
        for (i, chunk) in self.words.chunks(4).enumerate() {
            let base = i as i64 * 4 * WORD_BYTES;
            let cells: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(j, v)| format!("mem[{:>3}]={:<12}", base + j as i64 * WORD_BYTES, v))
                .collect();
            println!("{}", cells.join(" "));
        }
    }
}
