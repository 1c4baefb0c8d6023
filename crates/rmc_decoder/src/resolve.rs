use crate::{DecodeError, Result};
use rmc_instruction::{Operand, Register, Segment};

/// The kind of storage an encoded operand field refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    Immediate,
    Register,
    Segment,
}

/// Turns an encoded operand (a register or segment index, or an immediate value) into an
/// [Operand]. Only records where a later load or store will go; nothing is read or written here.
pub fn resolve(kind: OperandKind, value: u16) -> Result<Operand> {
    match kind {
        OperandKind::Immediate => Ok(Operand::Immediate(value)),
        OperandKind::Register => Register::from_index(value)
            .map(Operand::Register)
            .ok_or(DecodeError::InvalidRegisterIndex(value)),
        OperandKind::Segment => Segment::from_index(value)
            .map(Operand::Segment)
            .ok_or(DecodeError::InvalidRegisterIndex(value)),
    }
}
