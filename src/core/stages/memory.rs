use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::arch::AddressError;
use crate::core::pipeline::latches::MemWbBundle;

pub fn mem_stage(cpu: &mut Cpu) -> Result<Option<MemWbBundle>, SimError> {
    let Some(bundle) = cpu.ex_mem.take() else {
        return Ok(None);
    };

    let cycle = cpu.stats.cycles;
    let index = bundle.inst.index;
    let addr = bundle.alu_result;

    let mut loaded_value = 0;
    if bundle.ctrl.mem_read {
        loaded_value = cpu
            .mem
            .read(addr)
            .map_err(|e| address_fault(e, cycle, index, addr))?;
        if cpu.trace {
            eprintln!("MEM #{} load  mem[{}] => {}", index, addr, loaded_value);
        }
    } else if bundle.ctrl.mem_write {
        cpu.mem
            .write(addr, bundle.store_val)
            .map_err(|e| address_fault(e, cycle, index, addr))?;
        if cpu.trace {
            eprintln!("MEM #{} store mem[{}] <= {}", index, addr, bundle.store_val);
        }
    }

    Ok(Some(MemWbBundle {
        inst: bundle.inst,
        ctrl: bundle.ctrl,
        alu_result: bundle.alu_result,
        loaded_value,
        dest: bundle.dest,
    }))
}

fn address_fault(err: AddressError, cycle: u64, index: usize, addr: i64) -> SimError {
    match err {
        AddressError::Misaligned => SimError::MisalignedAddress { cycle, index, addr },
        AddressError::OutOfRange => SimError::AddressOutOfRange { cycle, index, addr },
    }
}
