use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unsupported op code ({0:#04x})")]
    UnsupportedOpcode(u8),
    #[error("Unsupported addressing mode in modR/M byte ({0:#010b})")]
    UnsupportedAddressingMode(u8),
    #[error("Instruction does not fit in the fetched bytes")]
    Truncated,
    #[error("Invalid register index ({0})")]
    InvalidRegisterIndex(u16),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
