use rmc_instruction::Operand;

use crate::cpu::RegisterFile;
use crate::error::{ExecutionError, ExecutionResult};
use crate::memory::Memory;

/// Reading and writing the 16-bit cell an [Operand] refers to.
pub trait OperandAccess {
    fn load(&self, registers: &RegisterFile, memory: &Memory) -> ExecutionResult<u16>;

    fn store(
        &self,
        registers: &mut RegisterFile,
        memory: &mut Memory,
        value: u16,
    ) -> ExecutionResult<()>;
}

impl OperandAccess for Operand {
    fn load(&self, registers: &RegisterFile, memory: &Memory) -> ExecutionResult<u16> {
        match self {
            Operand::Immediate(value) => Ok(*value),
            Operand::Register(register) => Ok(registers.register(*register)),
            Operand::Segment(segment) => Ok(registers.segment(*segment)),
            Operand::Memory(segment, offset) => {
                memory.read_word(registers.segment(*segment), *offset)
            }
        }
    }

    fn store(
        &self,
        registers: &mut RegisterFile,
        memory: &mut Memory,
        value: u16,
    ) -> ExecutionResult<()> {
        match self {
            Operand::Immediate(_) => Err(ExecutionError::ImmutableOperand),
            Operand::Register(register) => {
                registers.set_register(*register, value);
                Ok(())
            }
            Operand::Segment(segment) => {
                registers.set_segment(*segment, value);
                Ok(())
            }
            Operand::Memory(segment, offset) => {
                memory.write_word(registers.segment(*segment), *offset, value)
            }
        }
    }
}
