//! Assembly program loader.
//!
//! Parses programs of the form:
//!
//! ```text
//! lw 2 8(0)
//! lw 3 16(0)
//! add $4, $2, $3
//! sw 4 24(0)
//! ```
//!
//! Commas and `$` register prefixes are optional; blank lines and `#`
//! comments are skipped. Every structural problem, including branch
//! targets that leave the program, is rejected here so that nothing
//! malformed ever enters the pipeline.

use crate::common::error::LoadError;
use crate::isa::{Instruction, Opcode};

/// Parses assembly text into a validated program.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, LoadError> {
    let mut program = Vec::new();
    let mut source_lines = Vec::new();

    for (n, raw) in text.lines().enumerate() {
        let line = n + 1;
        let stripped = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let cleaned = stripped.replace(',', " ");
        let mut tokens = cleaned.split_whitespace();
        let Some(mnemonic) = tokens.next() else {
            continue;
        };
        let operands: Vec<&str> = tokens.collect();
        let inst = parse_instruction(mnemonic, &operands, line, program.len())?;
        program.push(inst);
        source_lines.push(line);
    }

    // Branch targets may land anywhere inside the program, or exactly one
    // past the end (a branch off the end of the program).
    let len = program.len() as i64;
    for (inst, &line) in program.iter().zip(&source_lines) {
        if inst.opcode == Opcode::Beq {
            let target = inst.index as i64 + 1 + inst.imm;
            if target < 0 || target > len {
                return Err(LoadError::BranchTarget { line, target });
            }
        }
    }

    Ok(program)
}

fn parse_instruction(
    mnemonic: &str,
    operands: &[&str],
    line: usize,
    index: usize,
) -> Result<Instruction, LoadError> {
    let opcode = match mnemonic {
        "add" => Opcode::Add,
        "sub" => Opcode::Sub,
        "lw" => Opcode::Lw,
        "sw" => Opcode::Sw,
        "beq" => Opcode::Beq,
        _ => {
            return Err(LoadError::UnknownOpcode {
                line,
                mnemonic: mnemonic.to_string(),
            });
        }
    };

    let expect = |n: usize| -> Result<(), LoadError> {
        if operands.len() == n {
            Ok(())
        } else {
            Err(LoadError::OperandCount {
                line,
                mnemonic: mnemonic.to_string(),
                expected: n,
                found: operands.len(),
            })
        }
    };

    match opcode {
        Opcode::Add | Opcode::Sub => {
            expect(3)?;
            let rd = parse_register(operands[0], line)?;
            let rs = parse_register(operands[1], line)?;
            let rt = parse_register(operands[2], line)?;
            Ok(Instruction {
                opcode,
                rs,
                rt,
                rd: Some(rd),
                imm: 0,
                index,
            })
        }
        Opcode::Lw | Opcode::Sw => {
            expect(2)?;
            let rt = parse_register(operands[0], line)?;
            let (imm, rs) = parse_mem_operand(operands[1], line)?;
            Ok(Instruction {
                opcode,
                rs,
                rt,
                rd: None,
                imm,
                index,
            })
        }
        Opcode::Beq => {
            expect(3)?;
            let rs = parse_register(operands[0], line)?;
            let rt = parse_register(operands[1], line)?;
            let imm = parse_immediate(operands[2], line)?;
            Ok(Instruction {
                opcode,
                rs,
                rt,
                rd: None,
                imm,
                index,
            })
        }
    }
}

fn parse_register(token: &str, line: usize) -> Result<usize, LoadError> {
    let digits = token.strip_prefix('$').unwrap_or(token);
    let value: i64 = digits.parse().map_err(|_| LoadError::MalformedOperand {
        line,
        operand: token.to_string(),
    })?;
    if !(0..32).contains(&value) {
        return Err(LoadError::RegisterRange { line, index: value });
    }
    Ok(value as usize)
}

fn parse_immediate(token: &str, line: usize) -> Result<i64, LoadError> {
    token.parse().map_err(|_| LoadError::MalformedOperand {
        line,
        operand: token.to_string(),
    })
}

/// Parses an `offset(base)` memory operand, e.g. `8($0)`.
fn parse_mem_operand(token: &str, line: usize) -> Result<(i64, usize), LoadError> {
    let malformed = || LoadError::MalformedOperand {
        line,
        operand: token.to_string(),
    };
    let open = token.find('(').ok_or_else(malformed)?;
    let inner = token[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
    let imm = parse_immediate(&token[..open], line)?;
    let rs = parse_register(inner, line)?;
    Ok((imm, rs))
}
