use std::ops::Range;

use tracing::debug;

use crate::error::{ExecutionError, ExecutionResult};

pub type Address = u32;

/// 64KiB, the size of a single segment.
pub const DEFAULT_MEMORY_SIZE: usize = 0x10000;

/// Translates a real mode `segment:offset` pair into a flat address. The result is not wrapped to
/// 20 bits; [Memory] rejects anything past its own size.
#[inline]
pub fn segment_and_offset(segment: u16, offset: u16) -> Address {
    ((segment as Address) << 4) + (offset as Address)
}

/// A flat, byte addressable store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a zero filled address space of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    fn range(&self, segment: u16, offset: u16, length: usize) -> ExecutionResult<Range<usize>> {
        let start = segment_and_offset(segment, offset) as usize;
        match start.checked_add(length) {
            Some(end) if end <= self.data.len() => Ok(start..end),
            _ => Err(ExecutionError::OutOfBounds {
                segment,
                offset,
                length,
            }),
        }
    }

    /// Returns a copy of `length` bytes starting at `segment:offset`.
    pub fn read(&self, segment: u16, offset: u16, length: usize) -> ExecutionResult<Vec<u8>> {
        let range = self.range(segment, offset, length)?;
        Ok(self.data[range].to_vec())
    }

    /// Copies `bytes` into memory starting at `segment:offset`. Nothing is written if any part of
    /// the range is out of bounds.
    pub fn write(&mut self, segment: u16, offset: u16, bytes: &[u8]) -> ExecutionResult<()> {
        let range = self.range(segment, offset, bytes.len())?;
        debug!(
            "Write {} bytes to [{:05X}]",
            bytes.len(),
            segment_and_offset(segment, offset)
        );
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Returns up to `max` bytes starting at `segment:offset`, fewer if the end of memory comes
    /// first. Only the first byte has to be in bounds.
    pub fn window(&self, segment: u16, offset: u16, max: usize) -> ExecutionResult<&[u8]> {
        let start = segment_and_offset(segment, offset) as usize;
        if start >= self.data.len() {
            return Err(ExecutionError::OutOfBounds {
                segment,
                offset,
                length: max,
            });
        }

        let end = start.saturating_add(max).min(self.data.len());
        Ok(&self.data[start..end])
    }

    pub fn read_word(&self, segment: u16, offset: u16) -> ExecutionResult<u16> {
        let range = self.range(segment, offset, 2)?;
        let bytes = &self.data[range];
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn write_word(&mut self, segment: u16, offset: u16, value: u16) -> ExecutionResult<()> {
        self.write(segment, offset, &value.to_le_bytes())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_translation() {
        assert_eq!(0x7C00, segment_and_offset(0x0000, 0x7C00));
        assert_eq!(0x7C00, segment_and_offset(0x07C0, 0x0000));
        assert_eq!(0x10FFEF, segment_and_offset(0xFFFF, 0xFFFF));
    }

    #[test]
    fn starts_zeroed() {
        let memory = Memory::new(0x100);
        assert_eq!(0x100, memory.size());
        assert_eq!(vec![0; 0x100], memory.read(0, 0, 0x100).unwrap());
    }

    #[test]
    fn read_back_what_was_written() {
        let mut memory = Memory::default();
        memory.write(0x0000, 0x7C00, &[0xEB, 0x3C, 0x90]).unwrap();

        assert_eq!(vec![0xEB, 0x3C, 0x90], memory.read(0x0000, 0x7C00, 3).unwrap());
        // Same flat address through a different segment.
        assert_eq!(vec![0xEB, 0x3C], memory.read(0x07C0, 0x0000, 2).unwrap());
    }

    #[test]
    fn out_of_bounds() {
        let mut memory = Memory::new(0x10);

        assert_eq!(
            Err(ExecutionError::OutOfBounds {
                segment: 0,
                offset: 0x0F,
                length: 2
            }),
            memory.read(0, 0x0F, 2)
        );
        assert_eq!(
            Err(ExecutionError::OutOfBounds {
                segment: 1,
                offset: 0,
                length: 1
            }),
            memory.write(1, 0, &[0xFF])
        );
        assert!(memory.read(0, 0x0F, 1).is_ok());
        assert!(memory.read(0, 0x10, 0).is_ok());
    }

    #[test]
    fn failed_write_changes_nothing() {
        let mut memory = Memory::new(0x10);
        assert!(memory.write(0, 0x0E, &[1, 2, 3]).is_err());
        assert_eq!(vec![0; 0x10], memory.read(0, 0, 0x10).unwrap());
    }

    #[test]
    fn window_is_clamped_at_the_end() {
        let mut memory = Memory::new(0x20);
        memory.write(0, 0x1E, &[0xBB, 0x78]).unwrap();

        assert_eq!(16, memory.window(0, 0, 16).unwrap().len());
        assert_eq!(&[0xBB, 0x78], memory.window(0, 0x1E, 16).unwrap());
        assert!(matches!(
            memory.window(0, 0x20, 16),
            Err(ExecutionError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn words_are_little_endian() {
        let mut memory = Memory::new(0x10);
        memory.write_word(0, 4, 0x1234).unwrap();

        assert_eq!(vec![0x34, 0x12], memory.read(0, 4, 2).unwrap());
        assert_eq!(0x1234, memory.read_word(0, 4).unwrap());
        assert!(memory.read_word(0, 0x0F).is_err());
    }
}
