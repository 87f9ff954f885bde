use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExMemBundle, MemWbBundle};
use crate::core::trace::StageView;
use crate::isa::Opcode;

pub fn execute_stage(
    cpu: &mut Cpu,
    in_mem: Option<&MemWbBundle>,
    retiring: Option<&MemWbBundle>,
) -> (Option<StageView>, Option<usize>) {
    let Some(bundle) = cpu.id_ex.take() else {
        cpu.ex_mem = None;
        return (None, None);
    };

    let inst = bundle.inst;

    let (rs_val, rs_src) = hazards::forward_operand(inst.rs, bundle.rs_val, in_mem, retiring);
    let (rt_val, rt_src) = if inst.reads_rt() {
        hazards::forward_operand(inst.rt, bundle.rt_val, in_mem, retiring)
    } else {
        (bundle.rt_val, None)
    };

    if cpu.trace {
        if let Some(src) = rs_src {
            eprintln!("EX  #{} forward rs=${} <= {:?}", inst.index, inst.rs, src);
        }
        if let Some(src) = rt_src {
            eprintln!("EX  #{} forward rt=${} <= {:?}", inst.index, inst.rt, src);
        }
    }

    let op_b = if bundle.ctrl.alu_src { inst.imm } else { rt_val };
    let alu_result = match inst.opcode {
        Opcode::Sub | Opcode::Beq => rs_val.wrapping_sub(op_b),
        Opcode::Add | Opcode::Lw | Opcode::Sw => rs_val.wrapping_add(op_b),
    };

    let mut redirect = None;
    if bundle.ctrl.branch {
        cpu.stats.branch_predictions += 1;
        // Predict not-taken: only an equal comparison redirects.
        if alu_result == 0 {
            let target = (inst.index as i64 + 1 + inst.imm) as usize;
            cpu.stats.branch_mispredictions += 1;
            if cpu.trace {
                eprintln!("EX  #{} beq taken, target #{}", inst.index, target);
            }
            redirect = Some(target);
        }
    }

    let ctrl = bundle.ctrl;
    cpu.ex_mem = Some(ExMemBundle {
        inst,
        ctrl,
        alu_result,
        store_val: rt_val,
        dest: bundle.dest,
    });

    (
        Some(StageView {
            opcode: inst.opcode,
            index: inst.index,
            ctrl: Some(ctrl),
            stalled: false,
        }),
        redirect,
    )
}
