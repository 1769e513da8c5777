//! Error types for prefix quoting operations

use std::io;

use crate::config::Marker;

/// Rejected marker configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Marker is not a visible 7-bit character
    #[error("{role} character {value:#04x} is not a graphic ASCII character")]
    MarkerNotGraphic { role: Marker, value: u8 },

    /// Two roles share the same character
    #[error("{first} and {second} characters are both {:?}", as_char(.value))]
    DuplicateMarker {
        first: Marker,
        second: Marker,
        value: u8,
    },

    /// Marker collides with the caret form of a control byte
    #[error(
        "{role} character {:?} is the caret form of control byte {:#04x}",
        as_char(.value),
        ctl_of(.value)
    )]
    MarkerShadowsControlQuote { role: Marker, value: u8 },
}

/// Main error type for prefix quoting operations
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid marker configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Input ended inside an escape sequence
    #[error("input ended inside escape sequence {} at offset {offset}", escape_debug(.sequence))]
    TruncatedEscape { offset: u64, sequence: Vec<u8> },

    /// Escape sequence the encoder never produces (strict mode)
    #[error("non-canonical escape sequence {} at offset {offset}", escape_debug(.sequence))]
    InvalidEscape { offset: u64, sequence: Vec<u8> },
}

fn as_char(value: &u8) -> char {
    char::from(*value)
}

fn ctl_of(value: &u8) -> u8 {
    crate::consts::ctl(*value)
}

fn escape_debug(sequence: &[u8]) -> String {
    format!("\"{}\"", sequence.escape_ascii())
}

/// A specialized `Result` type for prefix quoting operations
pub type Result<T> = std::result::Result<T, QuoteError>;
