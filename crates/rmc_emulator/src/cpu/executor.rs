use rmc_instruction::{Instruction, Operand, Operation, Register, Segment};

use super::calc;
use super::{Flags, OperandAccess, RegisterFile};
use crate::error::ExecutionResult;
use crate::memory::Memory;

fn push(registers: &mut RegisterFile, memory: &mut Memory, value: u16) -> ExecutionResult<()> {
    let ss = registers.segment(Segment::Ss);
    let sp = registers.register(Register::Sp).wrapping_sub(2);

    memory.write_word(ss, sp, value)?;
    registers.set_register(Register::Sp, sp);

    Ok(())
}

fn pop(
    registers: &mut RegisterFile,
    memory: &mut Memory,
    destination: &Operand,
) -> ExecutionResult<()> {
    let ss = registers.segment(Segment::Ss);
    let sp = registers.register(Register::Sp);

    let value = memory.read_word(ss, sp)?;
    destination.store(registers, memory, value)?;

    // `pop sp` leaves the popped value in sp.
    if *destination != Operand::Register(Register::Sp) {
        registers.set_register(Register::Sp, sp.wrapping_add(2));
    }

    Ok(())
}

/// Applies a decoded instruction to the CPU state and moves `ip` past it (or to the jump target).
/// On failure `ip` is left pointing at the instruction.
pub fn execute(
    instruction: &Instruction,
    registers: &mut RegisterFile,
    memory: &mut Memory,
) -> ExecutionResult<()> {
    let next_ip = registers.ip.wrapping_add(instruction.length as u16);

    match instruction.operation {
        Operation::Mov(ref destination, ref source) => {
            let value = source.load(registers, memory)?;
            destination.store(registers, memory, value)?;
        }

        Operation::Xor(ref destination, ref source) => {
            let d = destination.load(registers, memory)?;
            let s = source.load(registers, memory)?;

            let mut flags = registers.flags;
            let result = calc::xor(d, s, &mut flags);
            destination.store(registers, memory, result)?;
            registers.flags = flags;
        }

        Operation::Push(ref source) => {
            let value = source.load(registers, memory)?;
            push(registers, memory, value)?;
        }

        Operation::Pop(ref destination) => {
            pop(registers, memory, destination)?;
        }

        Operation::Jmp(displacement) => {
            registers.ip = next_ip.wrapping_add(displacement as i16 as u16);
            return Ok(());
        }

        Operation::Cli => {
            registers.flags.remove(Flags::INTERRUPT);
        }
    }

    registers.ip = next_ip;

    Ok(())
}
