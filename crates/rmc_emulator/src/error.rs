use rmc_decoder::DecodeError;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Memory access out of range! ({segment:04X}:{offset:04X}, {length} bytes)")]
    OutOfBounds {
        segment: u16,
        offset: u16,
        length: usize,
    },
    #[error("Trying to write to an immediate operand!")]
    ImmutableOperand,
    #[error("Invalid register index! ({0})")]
    InvalidRegisterIndex(usize),
}

/// Everything a single [Cpu::step](crate::Cpu::step) can fail with.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Could not decode instruction! {0}")]
    Decode(DecodeError),
    #[error("Could not execute instruction! {0}")]
    Execution(#[from] ExecutionError),
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        match err {
            // The register file has no slot for this index.
            DecodeError::InvalidRegisterIndex(index) => {
                Error::Execution(ExecutionError::InvalidRegisterIndex(index as usize))
            }
            err => Error::Decode(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_register_index_is_an_execution_error() {
        assert_eq!(
            Error::Execution(ExecutionError::InvalidRegisterIndex(6)),
            Error::from(DecodeError::InvalidRegisterIndex(6))
        );
        assert_eq!(
            Error::Decode(DecodeError::Truncated),
            Error::from(DecodeError::Truncated)
        );
    }
}
