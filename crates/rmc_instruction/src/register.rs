/// A 16-bit general purpose register. The discriminant is the 3-bit encoding used in the `reg` and
/// `rm` fields of a ModR/M byte and in the low bits of the `0x50`/`0x58`/`0xB8` opcode families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    Ax = 0,
    Cx = 1,
    Dx = 2,
    Bx = 3,
    Sp = 4,
    Bp = 5,
    Si = 6,
    Di = 7,
}

impl Register {
    pub const ALL: [Register; 8] = [
        Register::Ax,
        Register::Cx,
        Register::Dx,
        Register::Bx,
        Register::Sp,
        Register::Bp,
        Register::Si,
        Register::Di,
    ];

    /// Returns the register with the given encoding, or `None` if the index is not in `0..8`.
    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Register::*;

        match self {
            Ax => write!(f, "ax"),
            Cx => write!(f, "cx"),
            Dx => write!(f, "dx"),
            Bx => write!(f, "bx"),
            Sp => write!(f, "sp"),
            Bp => write!(f, "bp"),
            Si => write!(f, "si"),
            Di => write!(f, "di"),
        }
    }
}

/// A segment register, with the 2-bit encoding used by `PUSH`/`POP Sreg` and `MOV Sreg`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Segment {
    Es = 0,
    Cs = 1,
    Ss = 2,
    Ds = 3,
}

impl Segment {
    pub const ALL: [Segment; 4] = [Segment::Es, Segment::Cs, Segment::Ss, Segment::Ds];

    /// Returns the segment with the given encoding, or `None` if the index is not in `0..4`.
    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Segment::*;

        match self {
            Es => write!(f, "es"),
            Cs => write!(f, "cs"),
            Ss => write!(f, "ss"),
            Ds => write!(f, "ds"),
        }
    }
}
