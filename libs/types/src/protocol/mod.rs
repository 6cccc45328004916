//! Protocol-level data definitions
//!
//! Everything the wire contract fixes: frame geometry and keyword constants,
//! the frame/message data model, and the zero-copy message header. The rules
//! that interpret these definitions (decoding, encoding, validation) live in
//! the `codec` crate.

pub mod constants;
pub mod frame;

pub use constants::*;
pub use frame::{Frame, FrameType, Message, MessageHeader, OwnedMessage};
