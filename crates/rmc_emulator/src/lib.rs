//! The execution core of a 16-bit real mode x86 CPU: a flat [Memory], the [RegisterFile] and a
//! [Cpu] that runs fetch, decode and execute one instruction at a time.

mod cpu;
mod error;
mod memory;

pub use cpu::{
    execute, Cpu, Flags, OperandAccess, RegisterFile, RegisterSnapshot, RunOutcome,
    FETCH_WINDOW, RESET_IP,
};
pub use error::{Error, ExecutionError, ExecutionResult, Result};
pub use memory::{segment_and_offset, Address, Memory, DEFAULT_MEMORY_SIZE};
