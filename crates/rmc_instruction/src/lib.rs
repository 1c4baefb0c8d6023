//! This crate holds the structs that represent a decoded instruction for the real mode x86 core.
//! Values of these types are created by the decoder and consumed by the emulator; they never
//! hold references into CPU state.

mod instruction;
mod operand;
mod register;

pub use instruction::{Instruction, Operation};
pub use operand::Operand;
pub use register::{Register, Segment};
