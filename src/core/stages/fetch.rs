use crate::core::Cpu;
use crate::core::pipeline::latches::IfIdBundle;
use crate::core::trace::StageView;

pub fn fetch_stage(cpu: &mut Cpu) -> Option<StageView> {
    if cpu.if_id.is_some() {
        // Decode is holding a stalled instruction; fetch waits.
        return None;
    }

    let inst = *cpu.program.get(cpu.pc)?;
    cpu.pc += 1;

    if cpu.trace {
        eprintln!("IF  #{} {}", inst.index, inst.opcode);
    }

    cpu.if_id = Some(IfIdBundle {
        inst,
        stalled: false,
    });

    Some(StageView {
        opcode: inst.opcode,
        index: inst.index,
        ctrl: None,
        stalled: false,
    })
}
