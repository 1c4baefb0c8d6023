use crate::errors::Result;
use crate::resolve::{resolve, OperandKind};
use crate::traits::ReadExt;
use crate::DecodeError;
use rmc_instruction::{Instruction, Operand, Operation};

/// The longest encoding in the supported op code set is 3 bytes, but callers should hand in a
/// window of this size so longer encodings can be added without changing the fetch.
pub const MAX_INSTRUCTION_LENGTH: usize = 16;

fn register(index: u8) -> Result<Operand> {
    resolve(OperandKind::Register, index as u16)
}

fn segment(index: u8) -> Result<Operand> {
    resolve(OperandKind::Segment, index as u16)
}

/// `PUSH`/`POP Sreg` encode the segment in bits 3..5 of the op code.
fn segment_from_op_code(op_code: u8) -> Result<Operand> {
    segment((op_code >> 3) & 0b11)
}

#[derive(Clone, Copy)]
enum Direction {
    /// `op r/m16, reg`
    RegisterOrMemoryFirst,
    /// `op reg, r/m16`
    RegisterFirst,
}

/// Decodes a ModR/M byte where both fields are general purpose registers and returns the operands
/// as (destination, source).
fn register_and_register(
    it: &mut impl Iterator<Item = u8>,
    direction: Direction,
) -> Result<(Operand, Operand)> {
    let modrm = it.read_modrm()?;
    let reg = register(modrm.reg)?;
    let rm = register(modrm.rm)?;

    Ok(match direction {
        Direction::RegisterOrMemoryFirst => (rm, reg),
        Direction::RegisterFirst => (reg, rm),
    })
}

/// Decodes a ModR/M byte where `reg` is a segment register and `rm` a general purpose register.
fn register_and_segment(
    it: &mut impl Iterator<Item = u8>,
    direction: Direction,
) -> Result<(Operand, Operand)> {
    let modrm = it.read_modrm()?;
    let reg = segment(modrm.reg)?;
    let rm = register(modrm.rm)?;

    Ok(match direction {
        Direction::RegisterOrMemoryFirst => (rm, reg),
        Direction::RegisterFirst => (reg, rm),
    })
}

fn decode_operation(it: &mut impl Iterator<Item = u8>) -> Result<Operation> {
    let op_code = it.read_u8()?;

    match op_code {
        0x06 | 0x0E | 0x16 | 0x1E => Ok(Operation::Push(segment_from_op_code(op_code)?)),

        // 0x0F (pop cs) is left out on purpose, it was repurposed as an escape byte.
        0x07 | 0x17 | 0x1F => Ok(Operation::Pop(segment_from_op_code(op_code)?)),

        0x31 => {
            let (destination, source) =
                register_and_register(it, Direction::RegisterOrMemoryFirst)?;
            Ok(Operation::Xor(destination, source))
        }

        0x33 => {
            let (destination, source) = register_and_register(it, Direction::RegisterFirst)?;
            Ok(Operation::Xor(destination, source))
        }

        0x50..=0x57 => Ok(Operation::Push(register(op_code & 0b111)?)),

        0x58..=0x5F => Ok(Operation::Pop(register(op_code & 0b111)?)),

        0x89 => {
            let (destination, source) =
                register_and_register(it, Direction::RegisterOrMemoryFirst)?;
            Ok(Operation::Mov(destination, source))
        }

        0x8B => {
            let (destination, source) = register_and_register(it, Direction::RegisterFirst)?;
            Ok(Operation::Mov(destination, source))
        }

        0x8C => {
            let (destination, source) =
                register_and_segment(it, Direction::RegisterOrMemoryFirst)?;
            Ok(Operation::Mov(destination, source))
        }

        0x8E => {
            let (destination, source) = register_and_segment(it, Direction::RegisterFirst)?;
            Ok(Operation::Mov(destination, source))
        }

        0xB8..=0xBF => {
            let destination = register(op_code & 0b111)?;
            let source = resolve(OperandKind::Immediate, it.read_u16()?)?;
            Ok(Operation::Mov(destination, source))
        }

        0xEB => Ok(Operation::Jmp(it.read_displacement()?)),

        0xFA => Ok(Operation::Cli),

        _ => Err(DecodeError::UnsupportedOpcode(op_code)),
    }
}

/// Decodes the instruction at the start of `window`. The length of the instruction is recorded in
/// the returned [Instruction]; bytes after it are ignored.
pub fn decode_instruction(window: &[u8]) -> Result<Instruction> {
    let mut it = window.iter().copied();
    let operation = decode_operation(&mut it)?;
    let length = window.len() - it.len();

    debug_assert!(length <= MAX_INSTRUCTION_LENGTH);

    Ok(Instruction::new(operation, length as u8))
}
