use thiserror::Error;

/// Error type for draw operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// Hex literal with odd length or non-hex characters
    #[error("Hex decoding error: {0}")]
    InvalidHex(String),

    /// Base58 literal containing characters outside the alphabet
    #[error("Base58 decoding error: {0}")]
    InvalidBase58(String),

    /// Decoded payload cannot hold a version byte plus a 4-byte checksum
    #[error("Payload error: decoded {0} bytes, need at least 5")]
    PayloadTooShort(usize),

    /// Randomness seed wider than 32 bytes
    #[error("Seed error: {0} hex characters exceeds the 64 character key width")]
    SeedTooLong(usize),

    /// Position indices are encoded as 4-byte big-endian integers
    #[error("Item error: {0} items cannot be indexed with 32-bit positions")]
    TooManyItems(usize),

    /// Threshold computed over an empty population
    #[error("Threshold error: participant count must be positive")]
    NoParticipants,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<hex::FromHexError> for DrawError {
    fn from(error: hex::FromHexError) -> Self {
        DrawError::InvalidHex(error.to_string())
    }
}

impl From<bs58::decode::Error> for DrawError {
    fn from(error: bs58::decode::Error) -> Self {
        DrawError::InvalidBase58(error.to_string())
    }
}

impl From<serde_json::Error> for DrawError {
    fn from(error: serde_json::Error) -> Self {
        DrawError::Config(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
