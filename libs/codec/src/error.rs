//! Protocol-level errors for command encoding
//!
//! Encode-side argument validation fails loudly and synchronously, before a
//! single byte is produced, and each variant names the offending field,
//! argument, or index so the caller can fix the call site. Decoding never
//! returns these: malformed or truncated input from the wire is reported as
//! a `Frame` value instead, because "not enough data yet" is a routine
//! condition for a parser facing a socket, not an error.

use thiserror::Error;

/// Command encoding errors with the offending input spelled out
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Topic name failed the name grammar
    #[error(
        "invalid topic name {name:?}: 1-64 characters of [A-Za-z0-9_.-], optionally ending in #ephemeral"
    )]
    InvalidTopicName { name: String },

    /// Channel name failed the name grammar
    #[error(
        "invalid channel name {name:?}: 1-64 characters of [A-Za-z0-9_.-], optionally ending in #ephemeral"
    )]
    InvalidChannelName { name: String },

    /// Message id is not exactly 16 ASCII hex characters
    #[error("invalid message id {id:?}: expected exactly 16 hex characters")]
    InvalidMessageId { id: String },

    /// Identify option value failed its range rule
    #[error("identify option {field} out of range: {value} (allowed: {constraint})")]
    OptionOutOfRange {
        field: String,
        value: i64,
        constraint: String,
    },

    /// A count or interval argument was negative
    #[error("negative {argument}: {value} (must be >= 0)")]
    NegativeArgument { argument: String, value: i64 },

    /// A publish body was empty, which the daemon rejects
    #[error("empty message body at index {index}: bodies must contain at least one byte")]
    EmptyMessageBody { index: usize },

    /// A batched publish carried no messages
    #[error("empty publish batch: at least one message body is required")]
    EmptyBatch,
}

impl ProtocolError {
    /// Create an InvalidTopicName error carrying the rejected name
    pub fn invalid_topic(name: impl Into<String>) -> Self {
        Self::InvalidTopicName { name: name.into() }
    }

    /// Create an InvalidChannelName error carrying the rejected name
    pub fn invalid_channel(name: impl Into<String>) -> Self {
        Self::InvalidChannelName { name: name.into() }
    }

    /// Create an InvalidMessageId error carrying the rejected id
    pub fn invalid_message_id(id: impl Into<String>) -> Self {
        Self::InvalidMessageId { id: id.into() }
    }

    /// Create an OptionOutOfRange error naming the offending identify key
    pub fn option_out_of_range(
        field: impl Into<String>,
        value: i64,
        constraint: impl Into<String>,
    ) -> Self {
        Self::OptionOutOfRange {
            field: field.into(),
            value,
            constraint: constraint.into(),
        }
    }

    /// Create a NegativeArgument error naming the offending argument
    pub fn negative_argument(argument: impl Into<String>, value: i64) -> Self {
        Self::NegativeArgument {
            argument: argument.into(),
            value,
        }
    }

    /// Create an EmptyMessageBody error naming the offending batch index
    pub fn empty_body(index: usize) -> Self {
        Self::EmptyMessageBody { index }
    }
}

/// Result type for protocol operations
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
