//! Wire-format constants
//!
//! Frame geometry, the protocol magic, response keywords, and the daemon's
//! error-code vocabulary. Every value here is fixed by the wire contract;
//! changing any of them breaks interoperability with the daemon.

/// Protocol version magic sent once per connection, immediately after the TCP
/// connect and before any command: two spaces followed by `V2`.
pub const MAGIC_V2: &[u8; 4] = b"  V2";

/// Size of the big-endian frame size prefix.
pub const FRAME_SIZE_PREFIX: usize = 4;

/// Size of the big-endian frame type field.
pub const FRAME_TYPE_LEN: usize = 4;

/// Bytes before a frame's body starts: size prefix plus type field.
pub const FRAME_HEADER_SIZE: usize = FRAME_SIZE_PREFIX + FRAME_TYPE_LEN;

/// Smallest payload a frame can declare. The declared payload covers the
/// 4-byte type field plus the body, so anything below this is malformed.
pub const MIN_FRAME_PAYLOAD: usize = FRAME_TYPE_LEN;

/// Length of a message identifier on the wire.
pub const MSG_ID_LEN: usize = 16;

/// Fixed header inside a message frame body: timestamp (8) + attempts (2) +
/// id (16).
pub const MESSAGE_HEADER_SIZE: usize = 8 + 2 + MSG_ID_LEN;

/// Smallest payload a message frame can declare: type field plus the fixed
/// header, with a zero-length body.
pub const MIN_MESSAGE_PAYLOAD: usize = FRAME_TYPE_LEN + MESSAGE_HEADER_SIZE;

/// Default ceiling for a declared frame payload (16 MiB).
///
/// The size prefix is attacker-controlled input; declared lengths above this
/// are classified as malformed instead of being honored. Transports that
/// negotiated a different daemon limit can override it per decode call.
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Plain acknowledgement payload.
pub const RESPONSE_OK: &[u8] = b"OK";

/// Acknowledgement payload of the clean-close handshake.
pub const RESPONSE_CLOSE_WAIT: &[u8] = b"CLOSE_WAIT";

/// Payload of the daemon's periodic liveness probe. The transport is expected
/// to answer each one with a NOP command.
pub const RESPONSE_HEARTBEAT: &[u8] = b"_heartbeat_";

// Error codes the daemon puts in the first token of an error frame payload.
// The remainder of the payload is a human-readable description.

/// Generic protocol violation.
pub const E_INVALID: &str = "E_INVALID";
/// Topic name failed the daemon's grammar check.
pub const E_BAD_TOPIC: &str = "E_BAD_TOPIC";
/// Channel name failed the daemon's grammar check.
pub const E_BAD_CHANNEL: &str = "E_BAD_CHANNEL";
/// Body failed a size/shape check (empty, oversized, bad batch framing).
pub const E_BAD_BODY: &str = "E_BAD_BODY";
/// Message payload failed a size/shape check.
pub const E_BAD_MESSAGE: &str = "E_BAD_MESSAGE";
/// Publish could not be applied.
pub const E_PUB_FAILED: &str = "E_PUB_FAILED";
/// Batched publish could not be applied.
pub const E_MPUB_FAILED: &str = "E_MPUB_FAILED";
/// Finish referenced an unknown or not-in-flight message id.
pub const E_FIN_FAILED: &str = "E_FIN_FAILED";
/// Requeue referenced an unknown or not-in-flight message id.
pub const E_REQ_FAILED: &str = "E_REQ_FAILED";
/// Touch referenced an unknown or not-in-flight message id.
pub const E_TOUCH_FAILED: &str = "E_TOUCH_FAILED";
/// Authentication handshake failed.
pub const E_AUTH_FAILED: &str = "E_AUTH_FAILED";
/// Operation attempted without sufficient authorization.
pub const E_UNAUTHORIZED: &str = "E_UNAUTHORIZED";
