use crate::{DecodeError, Modrm, Result};

pub trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes([self.read_u8()?, self.read_u8()?]))
    }

    fn read_modrm(&mut self) -> Result<Modrm> {
        Modrm::try_from_byte(self.read_u8()?)
    }

    fn read_displacement(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }
}

impl<T: Iterator<Item = u8>> ReadExt for T {
    fn read_u8(&mut self) -> Result<u8> {
        self.next().ok_or(DecodeError::Truncated)
    }
}
