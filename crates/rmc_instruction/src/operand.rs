use crate::{Register, Segment};
use std::fmt::{Display, Formatter};

/// A resolved reference to a 16-bit storage cell. An operand only records *where* a value lives;
/// reading and writing it is up to whoever holds the CPU state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// A literal encoded in the instruction stream. Read only.
    Immediate(u16),
    Register(Register),
    Segment(Segment),
    /// A word in memory at `segment:offset`, where `segment` names the segment register to use.
    Memory(Segment, u16),
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Immediate(value) => write!(f, "{:#06x}", value),
            Operand::Register(register) => write!(f, "{}", register),
            Operand::Segment(segment) => write!(f, "{}", segment),
            Operand::Memory(segment, offset) => write!(f, "word [{}:{:#06x}]", segment, offset),
        }
    }
}
