use crate::core::Cpu;
use crate::core::control::ControlSignals;
use crate::core::pipeline::hazards::{self, Hazard};
use crate::core::pipeline::latches::{IdExBundle, IfIdBundle};
use crate::core::trace::StageView;

pub fn decode_stage(cpu: &mut Cpu) -> Option<StageView> {
    let held = cpu.if_id.take()?;
    let inst = held.inst;

    if let Some(hazard) = hazards::detect_hazard(&inst, cpu.ex_mem.as_ref(), cpu.mem_wb.as_ref()) {
        match hazard {
            Hazard::LoadUse => cpu.stats.stalls_load_use += 1,
            Hazard::BranchData => cpu.stats.stalls_branch += 1,
        }
        if cpu.trace {
            eprintln!("ID  #{} {} stall ({:?})", inst.index, inst.opcode, hazard);
        }
        cpu.if_id = Some(IfIdBundle {
            stalled: true,
            ..held
        });
        return Some(StageView {
            opcode: inst.opcode,
            index: inst.index,
            ctrl: None,
            stalled: true,
        });
    }

    let ctrl = ControlSignals::decode(inst.opcode);
    let dest = if ctrl.reg_write {
        Some(if ctrl.reg_dst {
            inst.rd.unwrap_or(inst.rt)
        } else {
            inst.rt
        })
    } else {
        None
    };
    let rs_val = cpu.regs.read(inst.rs);
    let rt_val = cpu.regs.read(inst.rt);

    if cpu.trace {
        eprintln!("ID  #{} {} rs=${} rt=${}", inst.index, inst.opcode, inst.rs, inst.rt);
    }

    cpu.id_ex = Some(IdExBundle {
        inst,
        ctrl,
        rs_val,
        rt_val,
        dest,
    });

    Some(StageView {
        opcode: inst.opcode,
        index: inst.index,
        ctrl: Some(ctrl),
        stalled: false,
    })
}
