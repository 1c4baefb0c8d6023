use bitflags::bitflags;
use rmc_instruction::{Register, Segment};
use std::fmt::{Display, Formatter};

use crate::error::{ExecutionError, ExecutionResult};

bitflags! {
    /// Every bit of the flags word has a name, so bits without a defined meaning survive a round
    /// trip through [Flags::from_bits_truncate].
    pub struct Flags : u16 {
        const CARRY = 1 << 0;
        const RESERVED_1 = 1 << 1;
        const PARITY = 1 << 2;
        const RESERVED_3 = 1 << 3;
        const AUX_CARRY = 1 << 4;
        const RESERVED_5 = 1 << 5;
        const ZERO = 1 << 6;
        const SIGN = 1 << 7;
        const TRAP = 1 << 8;
        const INTERRUPT = 1 << 9;
        const DIRECTION = 1 << 10;
        const OVERFLOW = 1 << 11;
        const RESERVED_12 = 1 << 12;
        const RESERVED_13 = 1 << 13;
        const RESERVED_14 = 1 << 14;
        const RESERVED_15 = 1 << 15;
    }
}

/// The mutable state of the CPU. General purpose and segment registers are stored in encoding
/// order, so they can be reached by name or by the index found in an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    registers: [u16; 8],
    segments: [u16; 4],

    pub ip: u16,
    pub flags: Flags,
}

impl RegisterFile {
    #[inline(always)]
    pub fn register(&self, register: Register) -> u16 {
        self.registers[register.index()]
    }

    #[inline(always)]
    pub fn set_register(&mut self, register: Register, value: u16) {
        self.registers[register.index()] = value;
    }

    #[inline(always)]
    pub fn segment(&self, segment: Segment) -> u16 {
        self.segments[segment.index()]
    }

    #[inline(always)]
    pub fn set_segment(&mut self, segment: Segment, value: u16) {
        self.segments[segment.index()] = value;
    }

    pub fn register_by_index(&self, index: usize) -> ExecutionResult<u16> {
        self.registers
            .get(index)
            .copied()
            .ok_or(ExecutionError::InvalidRegisterIndex(index))
    }

    pub fn set_register_by_index(&mut self, index: usize, value: u16) -> ExecutionResult<()> {
        let register = self
            .registers
            .get_mut(index)
            .ok_or(ExecutionError::InvalidRegisterIndex(index))?;
        *register = value;
        Ok(())
    }

    pub fn segment_by_index(&self, index: usize) -> ExecutionResult<u16> {
        self.segments
            .get(index)
            .copied()
            .ok_or(ExecutionError::InvalidRegisterIndex(index))
    }

    pub fn set_segment_by_index(&mut self, index: usize, value: u16) -> ExecutionResult<()> {
        let segment = self
            .segments
            .get_mut(index)
            .ok_or(ExecutionError::InvalidRegisterIndex(index))?;
        *segment = value;
        Ok(())
    }

    pub fn snapshot(&self) -> RegisterSnapshot {
        use Register::*;
        use Segment::*;

        RegisterSnapshot {
            ax: self.register(Ax),
            cx: self.register(Cx),
            dx: self.register(Dx),
            bx: self.register(Bx),
            sp: self.register(Sp),
            bp: self.register(Bp),
            si: self.register(Si),
            di: self.register(Di),
            es: self.segment(Es),
            cs: self.segment(Cs),
            ss: self.segment(Ss),
            ds: self.segment(Ds),
            ip: self.ip,
            flags: self.flags,
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            registers: [0; 8],
            segments: [0; 4],
            ip: 0,
            flags: Flags::empty(),
        }
    }
}

impl Display for RegisterFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.snapshot().fmt(f)
    }
}

/// A copy of all registers at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub ax: u16,
    pub cx: u16,
    pub dx: u16,
    pub bx: u16,
    pub sp: u16,
    pub bp: u16,
    pub si: u16,
    pub di: u16,

    pub es: u16,
    pub cs: u16,
    pub ss: u16,
    pub ds: u16,

    pub ip: u16,
    pub flags: Flags,
}

impl Display for RegisterSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AX: {:04X} ", self.ax)?;
        write!(f, "BX: {:04X} ", self.bx)?;
        write!(f, "CX: {:04X} ", self.cx)?;
        write!(f, "DX: {:04X} ", self.dx)?;

        write!(f, "SP: {:04X} ", self.sp)?;
        write!(f, "BP: {:04X} ", self.bp)?;
        write!(f, "SI: {:04X} ", self.si)?;
        write!(f, "DI: {:04X} ", self.di)?;

        write!(f, "ES: {:04X} ", self.es)?;
        write!(f, "CS: {:04X} ", self.cs)?;
        write!(f, "SS: {:04X} ", self.ss)?;
        write!(f, "DS: {:04X} ", self.ds)?;

        write!(f, "IP: {:04X} ", self.ip)?;

        macro_rules! print_flag {
            ($name:ident,$flag:expr) => {{
                if self.flags.contains($flag) {
                    write!(f, "{}", stringify!($name))?;
                } else {
                    write!(f, ".")?;
                }
            }};
        }

        print_flag!(O, Flags::OVERFLOW);
        print_flag!(D, Flags::DIRECTION);
        print_flag!(I, Flags::INTERRUPT);
        print_flag!(T, Flags::TRAP);
        print_flag!(S, Flags::SIGN);
        print_flag!(Z, Flags::ZERO);
        print_flag!(A, Flags::AUX_CARRY);
        print_flag!(P, Flags::PARITY);
        print_flag!(C, Flags::CARRY);

        Ok(())
    }
}
