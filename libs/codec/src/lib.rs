//! # nsqwire Protocol Codec
//!
//! ## Purpose
//!
//! The "rules" layer of the nsqwire stack:
//! - Frame decoding (daemon to client direction)
//! - Command encoding (client to daemon direction)
//! - Argument validation shared by the command builders
//! - The big-endian scalar codec both directions sit on
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → transport (external)
//!     ↑           ↓             ↓
//! Pure Data    Protocol    Sockets, read loops,
//! Structures   Rules       buffering, retries
//! ```
//!
//! The transport collaborator owns the socket and the accumulation buffer.
//! It feeds whatever bytes it has to [`decode_frame`], retains unconsumed
//! bytes across calls, and writes [`EncodedCommand`] bytes to the wire. This
//! crate never performs I/O and keeps no state between calls: every decode
//! and every encode is a pure function of its arguments, safe to call from
//! any number of threads or tasks concurrently.
//!
//! ## What This Crate Contains
//!
//! - **parser**: zero-copy frame decoder with exact partial/invalid accounting
//! - **builder**: command builders returning bytes plus the expected reply
//! - **validation**: name grammar, message-id format, range rules
//! - **wire**: 2/4/8-byte big-endian integer codec
//! - Protocol error types that name the offending input
//!
//! ## What This Crate Does NOT Contain
//!
//! - Socket management or connection state (belongs to the transport)
//! - Heartbeat reply scheduling (the transport answers probes with [`no_op`])
//! - TLS/compression implementations (identify only carries the flags)
//!
//! ## Quick Start
//!
//! ```rust
//! use codec::{decode_frame, publish, Frame};
//!
//! let command = publish("events", b"hello")?;
//! assert!(command.bytes.starts_with(b"PUB events\n"));
//!
//! // the transport writes command.bytes, then reads the daemon's reply:
//! let reply = [0, 0, 0, 6, 0, 0, 0, 0, b'O', b'K'];
//! match decode_frame(&reply) {
//!     Frame::Response { payload, .. } => assert_eq!(payload, b"OK"),
//!     other => panic!("unexpected frame: {:?}", other),
//! }
//! # Ok::<(), codec::ProtocolError>(())
//! ```

// Core modules
pub mod builder;
pub mod error;
pub mod parser;
pub mod validation;
pub mod wire;

// Re-export key types for convenience
pub use builder::{
    auth, close, deferred_publish, finish, identify, magic, multi_publish, no_op, publish, ready,
    requeue, subscribe, touch, EncodedCommand, ExpectedReply,
};
pub use error::{ProtocolError, ProtocolResult};
pub use parser::{decode_frame, decode_frame_with_limit};
pub use validation::{is_valid_message_id, is_valid_name};

// Re-export the data model so transports can depend on this crate alone
pub use types::protocol::constants::*;
pub use types::{
    Frame, FrameType, IdentifyOptions, Message, MessageHeader, OwnedMessage, DEFAULT_USER_AGENT,
};
