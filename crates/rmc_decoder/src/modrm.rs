use crate::{DecodeError, Result};

const MODE_REGISTER: u8 = 0b11;

/// A decoded ModR/M byte (`mode:2 reg:3 rm:3`). Only the register-direct mode is supported, so both
/// fields always name registers; which register file they index into is up to the op code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modrm {
    pub reg: u8,
    pub rm: u8,
}

impl Modrm {
    pub fn new(reg: u8, rm: u8) -> Self {
        debug_assert!(reg <= 0b111 && rm <= 0b111);

        Self { reg, rm }
    }

    pub fn try_from_byte(byte: u8) -> Result<Self> {
        match byte >> 6 {
            MODE_REGISTER => Ok(Self::new((byte >> 3) & 0b111, byte & 0b111)),
            _ => Err(DecodeError::UnsupportedAddressingMode(byte)),
        }
    }
}

impl From<Modrm> for u8 {
    fn from(modrm: Modrm) -> Self {
        MODE_REGISTER << 6 | (modrm.reg & 0b111) << 3 | (modrm.rm & 0b111)
    }
}
