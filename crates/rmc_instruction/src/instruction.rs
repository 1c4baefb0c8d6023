use crate::Operand;
use std::fmt::{Display, Formatter};

/// The operation an instruction performs, together with its operands. Operands are listed
/// destination first, the same order as Intel syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Mov(Operand, Operand),
    Xor(Operand, Operand),
    Push(Operand),
    Pop(Operand),
    /// Short jump, relative to the first byte after the instruction.
    Jmp(i8),
    Cli,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Mov(destination, source) => write!(f, "mov {}, {}", destination, source),
            Operation::Xor(destination, source) => write!(f, "xor {}, {}", destination, source),
            Operation::Push(source) => write!(f, "push {}", source),
            Operation::Pop(destination) => write!(f, "pop {}", destination),
            Operation::Jmp(displacement) => {
                let sign = if *displacement < 0 { '-' } else { '+' };
                write!(f, "jmp short {}{:#04x}", sign, displacement.unsigned_abs())
            }
            Operation::Cli => write!(f, "cli"),
        }
    }
}

/// A decoded instruction, ready to be executed.
///
/// ```rust
/// use rmc_instruction::*;
///
/// // mov cx, 0x0078
/// let i = Instruction::new(
///     Operation::Mov(Operand::Register(Register::Cx), Operand::Immediate(0x78)),
///     3,
/// );
/// assert_eq!("mov cx, 0x0078", i.to_string());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub operation: Operation,
    /// Number of bytes the instruction occupied in the instruction stream.
    pub length: u8,
}

impl Instruction {
    /// Create a new instruction with the given [Operation] and encoded length in bytes.
    pub fn new(operation: Operation, length: u8) -> Self {
        Self { operation, length }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.operation.fmt(f)
    }
}
