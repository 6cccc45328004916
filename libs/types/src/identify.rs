//! Negotiable per-connection client properties
//!
//! `IdentifyOptions` carries every property the identify handshake can set.
//! Defaults match what the daemon assumes when a field is left alone. Range
//! rules are deliberately not enforced here: the identify builder in `codec`
//! checks them at encode time so a violation can name the offending key.

use serde::{Deserialize, Serialize};

/// Library-identifying user agent reported during the identify handshake.
pub const DEFAULT_USER_AGENT: &str = concat!("nsqwire/", env!("CARGO_PKG_VERSION"));

/// Client properties sent once per connection via the identify handshake.
///
/// A value is built fresh for each identify command, serialized, and
/// discarded; it is not retained connection state. The serde derives exist so
/// operators can keep per-environment settings in configuration files
/// (`#[serde(default)]` fills unspecified fields from the wire defaults);
/// the wire encoding itself never goes through serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifyOptions {
    /// Announce a client identifier to the daemon.
    pub client_id: bool,
    /// Hostname reported to the daemon.
    pub hostname: String,
    /// Ask the daemon to answer identify with a JSON capabilities payload
    /// instead of a plain acknowledgement.
    pub feature_negotiation: bool,
    /// Heartbeat interval in milliseconds. 0 keeps the daemon default, -1
    /// disables heartbeats, anything else must be >= 1000.
    pub heartbeat_interval: i64,
    /// Daemon-side output buffer size in bytes. 0 keeps the default, -1
    /// disables buffering, anything else must be >= 64.
    pub output_buffer_size: i64,
    /// Daemon-side output buffer flush timeout in milliseconds. 0 keeps the
    /// default, -1 disables the timeout, anything else must be >= 1.
    pub output_buffer_timeout: i64,
    /// Request a TLS upgrade after the identify response.
    pub tls_v1: bool,
    /// Request a snappy-compressed stream.
    pub snappy: bool,
    /// Request a deflate-compressed stream.
    pub deflate: bool,
    /// Deflate compression level; must be >= 1.
    pub deflate_level: i64,
    /// Deliver only this percentage of messages; 0..=99, 0 disables sampling.
    pub sample_rate: i64,
    /// Client library identification string.
    pub user_agent: String,
    /// Daemon-side in-flight timeout in milliseconds. 0 keeps the default,
    /// anything else must be >= 1000.
    pub msg_timeout: i64,
}

impl Default for IdentifyOptions {
    fn default() -> Self {
        Self {
            client_id: false,
            hostname: "localhost".to_string(),
            feature_negotiation: false,
            heartbeat_interval: 0,
            output_buffer_size: 0,
            output_buffer_timeout: 0,
            tls_v1: false,
            snappy: false,
            deflate: false,
            deflate_level: 1,
            sample_rate: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            msg_timeout: 0,
        }
    }
}
