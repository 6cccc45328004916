//! Decoded-frame data model
//!
//! One frame on the wire is a big-endian size prefix, a big-endian type code,
//! and a body. For message frames the body starts with a fixed 26-byte header:
//!
//! ```text
//! ┌──────────┬──────────┬──────────────┬──────────┬────────────┬──────────┐
//! │ size     │ type     │ timestamp_ns │ attempts │ id         │ body     │
//! │ i32 BE   │ i32 BE   │ i64 BE       │ u16 BE   │ 16 bytes   │ size-30  │
//! │ [0,4)    │ [4,8)    │ [8,16)       │ [16,18)  │ [18,34)    │ [34,..)  │
//! └──────────┴──────────┴──────────────┴──────────┴────────────┴──────────┘
//! ```
//!
//! The declared `size` covers everything after the size prefix (type field
//! included). `Frame` and `Message` borrow from the receive buffer; the buffer
//! owner must not reuse it while a view is live, or must copy out through
//! [`Message::to_owned`] first.

use crate::protocol::constants::{MSG_ID_LEN, RESPONSE_HEARTBEAT};
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use zerocopy::byteorder::{BigEndian, I64, U16};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// Frame classification codes exactly as they appear on the wire.
#[repr(i32)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize,
)]
pub enum FrameType {
    /// Acknowledgements, heartbeats, and negotiated JSON payloads.
    Response = 0,
    /// Daemon-reported protocol errors (an `E_*` code plus description).
    Error = 1,
    /// A delivered message.
    Message = 2,
}

/// Fixed message header (26 bytes)
///
/// Sits at the start of every message frame body, immediately after the frame
/// type field. All integer fields are big-endian on the wire; the
/// `zerocopy::byteorder` field types make the struct layout identical to the
/// wire layout so it can be overlaid on the receive buffer without copying.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct MessageHeader {
    /// Nanosecond timestamp assigned by the daemon at (re)delivery.
    pub timestamp_ns: I64<BigEndian>,
    /// Delivery attempt counter, incremented by the daemon per redelivery.
    pub attempts: U16<BigEndian>,
    /// Opaque 16-byte identifier correlating later finish/requeue/touch.
    pub id: [u8; MSG_ID_LEN],
}

impl MessageHeader {
    /// Header size in bytes
    pub const SIZE: usize = 26;
}

/// A delivered message, borrowing id and body from the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    /// Nanosecond delivery timestamp.
    pub timestamp_ns: i64,
    /// Delivery attempt counter.
    pub attempts: u16,
    /// Opaque identifier, conventionally ASCII hex but carried as raw bytes.
    pub id: &'a [u8; MSG_ID_LEN],
    /// Application payload; may be empty.
    pub body: &'a [u8],
}

impl<'a> Message<'a> {
    /// View of the identifier as UTF-8, the form finish/requeue/touch take.
    ///
    /// Producers conventionally use ASCII hex ids; a non-UTF-8 id yields
    /// `None` rather than a lossy rendering.
    pub fn id_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.id).ok()
    }

    /// Copy out of the receive buffer so the buffer can be reused.
    pub fn to_owned(&self) -> OwnedMessage {
        OwnedMessage {
            timestamp_ns: self.timestamp_ns,
            attempts: self.attempts,
            id: *self.id,
            body: self.body.to_vec(),
        }
    }
}

/// An owned copy of a delivered message, detached from the receive buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedMessage {
    pub timestamp_ns: i64,
    pub attempts: u16,
    pub id: [u8; MSG_ID_LEN],
    pub body: Vec<u8>,
}

/// Outcome of decoding one frame from a receive buffer.
///
/// `Partial` and `Invalid` never carry payloads. For every other variant,
/// `consumed` equals the frame's full extent (size prefix plus declared
/// payload), so the caller advances its buffer offset by exactly that amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// Not enough bytes buffered yet; `needed` more are required before the
    /// next decode attempt can make progress.
    Partial { needed: usize },
    /// Malformed frame. `consumed` bytes may be skipped to reach the next
    /// frame boundary; zero means the length prefix itself cannot be trusted
    /// and the connection should be dropped.
    Invalid { consumed: usize },
    /// Acknowledgement, heartbeat, or negotiated JSON payload.
    Response { payload: &'a [u8], consumed: usize },
    /// Daemon-reported protocol error.
    Error { payload: &'a [u8], consumed: usize },
    /// A delivered message.
    Message { message: Message<'a>, consumed: usize },
}

impl<'a> Frame<'a> {
    /// Bytes consumed from the input by this outcome; `None` while partial.
    pub fn consumed(&self) -> Option<usize> {
        match *self {
            Frame::Partial { .. } => None,
            Frame::Invalid { consumed }
            | Frame::Response { consumed, .. }
            | Frame::Error { consumed, .. }
            | Frame::Message { consumed, .. } => Some(consumed),
        }
    }

    /// Additional bytes required before a complete frame can decode.
    pub fn needed(&self) -> Option<usize> {
        match *self {
            Frame::Partial { needed } => Some(needed),
            _ => None,
        }
    }

    /// True while more input is required.
    pub fn is_partial(&self) -> bool {
        matches!(self, Frame::Partial { .. })
    }

    /// True for the daemon's periodic liveness probe.
    pub fn is_heartbeat(&self) -> bool {
        matches!(self, Frame::Response { payload, .. } if *payload == RESPONSE_HEARTBEAT)
    }

    /// The `E_*` code token of an error frame, split off the description.
    pub fn error_code(&self) -> Option<&'a str> {
        match *self {
            Frame::Error { payload, .. } => {
                let code = payload.split(|&b| b == b' ').next()?;
                if code.is_empty() {
                    None
                } else {
                    std::str::from_utf8(code).ok()
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::MESSAGE_HEADER_SIZE;

    #[test]
    fn header_layout_is_packed() {
        assert_eq!(std::mem::size_of::<MessageHeader>(), MessageHeader::SIZE);
        assert_eq!(MessageHeader::SIZE, MESSAGE_HEADER_SIZE);
    }

    #[test]
    fn frame_type_codes() {
        assert_eq!(FrameType::try_from(0), Ok(FrameType::Response));
        assert_eq!(FrameType::try_from(1), Ok(FrameType::Error));
        assert_eq!(FrameType::try_from(2), Ok(FrameType::Message));
        assert!(FrameType::try_from(99).is_err());
        assert!(FrameType::try_from(-1).is_err());
    }

    #[test]
    fn heartbeat_recognition() {
        let heartbeat = Frame::Response {
            payload: b"_heartbeat_",
            consumed: 15,
        };
        assert!(heartbeat.is_heartbeat());

        let ok = Frame::Response {
            payload: b"OK",
            consumed: 6,
        };
        assert!(!ok.is_heartbeat());
        assert!(!Frame::Partial { needed: 2 }.is_heartbeat());
    }

    #[test]
    fn error_code_extraction() {
        let with_description = Frame::Error {
            payload: b"E_BAD_TOPIC SUB topic name \"$\" is not valid",
            consumed: 48,
        };
        assert_eq!(with_description.error_code(), Some("E_BAD_TOPIC"));

        let bare = Frame::Error {
            payload: b"E_INVALID",
            consumed: 13,
        };
        assert_eq!(bare.error_code(), Some("E_INVALID"));

        let empty = Frame::Error {
            payload: b"",
            consumed: 4,
        };
        assert_eq!(empty.error_code(), None);

        let response = Frame::Response {
            payload: b"OK",
            consumed: 6,
        };
        assert_eq!(response.error_code(), None);
    }

    #[test]
    fn consumed_and_needed_are_disjoint() {
        let partial = Frame::Partial { needed: 3 };
        assert_eq!(partial.needed(), Some(3));
        assert_eq!(partial.consumed(), None);
        assert!(partial.is_partial());

        let invalid = Frame::Invalid { consumed: 12 };
        assert_eq!(invalid.consumed(), Some(12));
        assert_eq!(invalid.needed(), None);
        assert!(!invalid.is_partial());
    }

    #[test]
    fn owned_copy_preserves_fields() {
        let id = *b"0123456789abcdef";
        let message = Message {
            timestamp_ns: 42,
            attempts: 7,
            id: &id,
            body: b"payload",
        };
        assert_eq!(message.id_str(), Some("0123456789abcdef"));

        let owned = message.to_owned();
        assert_eq!(owned.timestamp_ns, 42);
        assert_eq!(owned.attempts, 7);
        assert_eq!(owned.id, id);
        assert_eq!(owned.body, b"payload");
    }
}
