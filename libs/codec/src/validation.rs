//! Shared argument validators
//!
//! The name grammar for topics and channels, the message-id hex format, the
//! non-negative integer checks, and the identify range rules. Small pure
//! predicates with Result-wrapping counterparts used by the command builders.

use crate::error::{ProtocolError, ProtocolResult};
use types::MSG_ID_LEN;

/// Longest name the daemon accepts, ephemeral suffix included.
pub const MAX_NAME_LEN: usize = 64;

/// Suffix marking a topic or channel that disappears with its last client.
pub const EPHEMERAL_SUFFIX: &str = "#ephemeral";

/// Topic/channel name grammar: 1-64 characters of `[A-Za-z0-9_.-]`, with an
/// optional terminal `#ephemeral`.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    let base = name.strip_suffix(EPHEMERAL_SUFFIX).unwrap_or(name);
    !base.is_empty()
        && base
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-')
}

/// Message id format: exactly 16 hex characters, either case.
pub fn is_valid_message_id(id: &str) -> bool {
    id.len() == MSG_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Grammar check that reports the rejected name as a topic.
pub fn check_topic(name: &str) -> ProtocolResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(ProtocolError::invalid_topic(name))
    }
}

/// Grammar check that reports the rejected name as a channel.
pub fn check_channel(name: &str) -> ProtocolResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(ProtocolError::invalid_channel(name))
    }
}

/// Id format check for the finish/requeue/touch family.
pub fn check_message_id(id: &str) -> ProtocolResult<()> {
    if is_valid_message_id(id) {
        Ok(())
    } else {
        Err(ProtocolError::invalid_message_id(id))
    }
}

/// Reject negative counts and intervals, returning the value as unsigned.
pub fn check_non_negative(argument: &str, value: i64) -> ProtocolResult<u64> {
    if value < 0 {
        return Err(ProtocolError::negative_argument(argument, value));
    }
    Ok(value as u64)
}

// Identify range rules, one predicate per constrained field. The identify
// builder iterates these through its field table so every violation reports
// the same way.

pub(crate) fn heartbeat_interval_in_range(value: i64) -> bool {
    value == 0 || value == -1 || value >= 1000
}

pub(crate) fn output_buffer_size_in_range(value: i64) -> bool {
    value == 0 || value == -1 || value >= 64
}

pub(crate) fn output_buffer_timeout_in_range(value: i64) -> bool {
    value == 0 || value == -1 || value >= 1
}

pub(crate) fn deflate_level_in_range(value: i64) -> bool {
    value >= 1
}

pub(crate) fn sample_rate_in_range(value: i64) -> bool {
    (0..=99).contains(&value)
}

pub(crate) fn msg_timeout_in_range(value: i64) -> bool {
    value == 0 || value >= 1000
}
