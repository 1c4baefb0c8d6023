//! Turns raw bytes from the instruction stream into [Instruction](rmc_instruction::Instruction)
//! values. Decoding never touches CPU state: callers hand in a lookahead window of bytes and apply
//! the returned length themselves.

mod decode;
mod errors;
mod modrm;
mod resolve;
mod traits;

pub use decode::{decode_instruction, MAX_INSTRUCTION_LENGTH};
pub use errors::{DecodeError, Result};
pub use modrm::Modrm;
pub use resolve::{resolve, OperandKind};
