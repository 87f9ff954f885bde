use crate::core::Cpu;
use crate::core::pipeline::latches::MemWbBundle;
use crate::isa::Opcode;

pub fn wb_stage(cpu: &mut Cpu) -> Option<MemWbBundle> {
    let bundle = cpu.mem_wb.take()?;

    cpu.stats.instructions_retired += 1;
    match bundle.inst.opcode {
        Opcode::Add | Opcode::Sub => cpu.stats.inst_alu += 1,
        Opcode::Lw => cpu.stats.inst_load += 1,
        Opcode::Sw => cpu.stats.inst_store += 1,
        Opcode::Beq => cpu.stats.inst_branch += 1,
    }

    if bundle.ctrl.reg_write {
        if let Some(dest) = bundle.dest {
            let val = if bundle.ctrl.mem_to_reg {
                bundle.loaded_value
            } else {
                bundle.alu_result
            };
            if cpu.trace {
                eprintln!("WB  #{} ${} <= {}", bundle.inst.index, dest, val);
            }
            cpu.regs.write(dest, val);
        }
    }

    Some(bundle)
}
