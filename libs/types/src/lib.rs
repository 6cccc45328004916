//! # nsqwire Types Library
//!
//! Pure data structures for the nsqwire protocol stack: decoded frame views,
//! the fixed message header, identify options, and the wire constants both
//! directions of the protocol share.
//!
//! ## Design Philosophy
//!
//! - **Data Only**: structures and constants live here; encoding, decoding,
//!   and validation rules live in the `codec` crate
//! - **Zero-Copy Views**: decoded frames borrow from the receive buffer via
//!   zerocopy-enabled structs, with owned variants as an explicit escape hatch
//! - **Exact Wire Types**: big-endian integer fields are spelled as
//!   `zerocopy::byteorder` types so the in-memory layout is the wire layout
//! - **Clear Boundaries**: transport concerns (sockets, read loops, buffering)
//!   never appear at this layer
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{FrameType, IdentifyOptions};
//!
//! // Negotiable connection properties, defaults per the wire contract.
//! let mut options = IdentifyOptions::default();
//! options.heartbeat_interval = 30_000;
//!
//! // Wire code -> frame classification.
//! assert_eq!(FrameType::try_from(0), Ok(FrameType::Response));
//! assert!(FrameType::try_from(99).is_err());
//! ```
//!
//! ## Integration Points
//!
//! - **codec**: consumes these structures to implement the protocol rules
//! - **Transport layers**: own the buffers that `Frame`/`Message` borrow from
//!   and hold an `IdentifyOptions` per connection

pub mod identify;
pub mod protocol;

// Re-export commonly used types for convenience
pub use identify::{IdentifyOptions, DEFAULT_USER_AGENT};
pub use protocol::constants::*;
pub use protocol::frame::{Frame, FrameType, Message, MessageHeader, OwnedMessage};
