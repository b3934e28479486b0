//! Error type shared by the codec, the persisted formats and the file front end.
//!
//! Every failure falls into one of three kinds (see [`ErrorKind`]): the packed data is
//! corrupt, the caller used the codec wrongly (no table at all), or the file
//! system failed. None of them are retryable; the codec is deterministic.

use std::io;
use thiserror::Error;

/// Broad classification of a [`HuffError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The packed bytes (or a persisted table) are malformed or truncated.
    Corruption,
    /// The codec was driven without a code table, or asked to pack a byte the table lacks.
    Usage,
    /// Reading or writing a file failed.
    Io,
}

#[derive(Debug, Error)]
pub enum HuffError {
    #[error("padding length field is {0}, but it must be 0..=8")]
    InvalidPadding(u8),

    #[error("padding of {padding} bits is longer than the {available} payload bits")]
    PaddingOverrun { padding: u8, available: usize },

    #[error("bit stream ended inside a code ({0} unmatched bits left)")]
    Truncated(usize),

    /// Corrupt data or a table from another input; the two cannot be told apart.
    #[error("no code in the table matches the bits starting at bit {0}")]
    UnknownCode(usize),

    #[error("no code table was supplied for a non-empty stream")]
    MissingTable,

    #[error("byte {0:#04x} has no code in the table")]
    UnmappedSymbol(u8),

    #[error("invalid code table: {0}")]
    BadTable(String),

    #[error("invalid archive: {0}")]
    BadArchive(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HuffError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HuffError::InvalidPadding(_)
            | HuffError::PaddingOverrun { .. }
            | HuffError::Truncated(_)
            | HuffError::UnknownCode(_)
            | HuffError::BadTable(_)
            | HuffError::BadArchive(_) => ErrorKind::Corruption,
            HuffError::MissingTable | HuffError::UnmappedSymbol(_) => ErrorKind::Usage,
            HuffError::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(HuffError::InvalidPadding(9).kind(), ErrorKind::Corruption);
        assert_eq!(HuffError::Truncated(3).kind(), ErrorKind::Corruption);
        assert_eq!(HuffError::UnknownCode(12).kind(), ErrorKind::Corruption);
        assert_eq!(HuffError::MissingTable.kind(), ErrorKind::Usage);
        let io_err: HuffError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(io_err.kind(), ErrorKind::Io);
    }

    #[test]
    fn messages_name_the_problem() {
        let msg = HuffError::PaddingOverrun { padding: 8, available: 0 }.to_string();
        assert!(msg.contains("8 bits"));
        assert_eq!(
            HuffError::UnmappedSymbol(0x41).to_string(),
            "byte 0x41 has no code in the table"
        );
    }
}
