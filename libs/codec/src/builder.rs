//! # Command Encoder
//!
//! ## Purpose
//!
//! Turns client intents into the exact byte sequences the daemon expects.
//! Every builder validates its arguments synchronously and either returns the
//! complete command or fails before producing a single byte; partial output
//! is never returned. Alongside the bytes, each command carries the reply
//! class the transport should wait for, so writes can be paired with
//! acknowledgements without the transport re-deriving protocol knowledge.
//!
//! ## Architecture Role
//!
//! ```text
//! Client intent → [validate] → [assemble] → EncodedCommand → transport write
//!                     ↓
//!              ProtocolError naming the
//!              offending field/argument/index
//! ```

use crate::error::{ProtocolError, ProtocolResult};
use crate::validation;
use crate::wire;
use tracing::debug;
use types::{IdentifyOptions, MAGIC_V2, RESPONSE_CLOSE_WAIT, RESPONSE_OK};

/// Reply class a command solicits from the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedReply {
    /// Plain acknowledgement frame.
    Ok,
    /// Acknowledgement of the clean-close handshake.
    CloseWait,
    /// Response frame carrying a JSON payload (negotiation or auth identity).
    Json,
}

impl ExpectedReply {
    /// Exact payload keyword of the acknowledgement, when there is one.
    pub fn keyword(&self) -> Option<&'static [u8]> {
        match self {
            ExpectedReply::Ok => Some(RESPONSE_OK),
            ExpectedReply::CloseWait => Some(RESPONSE_CLOSE_WAIT),
            ExpectedReply::Json => None,
        }
    }
}

/// Wire bytes for one command plus the reply the transport should wait for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCommand {
    /// Exact bytes to write, in one piece.
    pub bytes: Vec<u8>,
    /// Reply class to wait for; `None` for fire-and-forget commands.
    pub expects: Option<ExpectedReply>,
}

/// Serialized identify field value. The wire object is flat text, not JSON.
enum FieldValue<'a> {
    Bool(bool),
    Int(i64),
    Str(&'a str),
}

/// Protocol version magic, written once immediately after connecting and
/// before any command.
pub fn magic() -> EncodedCommand {
    EncodedCommand {
        bytes: MAGIC_V2.to_vec(),
        expects: None,
    }
}

/// IDENTIFY: negotiate per-connection properties.
///
/// Every constrained field is range-checked first; a violation names the
/// offending key. The payload serializes all fields in wire order as the flat
/// `{key:value,...}` object the daemon parses: unquoted keys and values, no
/// escaping, not JSON. Expects a JSON reply when feature negotiation is
/// requested, a plain acknowledgement otherwise.
pub fn identify(options: &IdentifyOptions) -> ProtocolResult<EncodedCommand> {
    let checks: [(&str, i64, fn(i64) -> bool, &str); 6] = [
        (
            "heartbeat_interval",
            options.heartbeat_interval,
            validation::heartbeat_interval_in_range,
            "0, -1, or >= 1000",
        ),
        (
            "output_buffer_size",
            options.output_buffer_size,
            validation::output_buffer_size_in_range,
            "0, -1, or >= 64",
        ),
        (
            "output_buffer_timeout",
            options.output_buffer_timeout,
            validation::output_buffer_timeout_in_range,
            "0, -1, or >= 1",
        ),
        (
            "deflate_level",
            options.deflate_level,
            validation::deflate_level_in_range,
            ">= 1",
        ),
        (
            "sample_rate",
            options.sample_rate,
            validation::sample_rate_in_range,
            "0 through 99",
        ),
        (
            "msg_timeout",
            options.msg_timeout,
            validation::msg_timeout_in_range,
            "0 or >= 1000",
        ),
    ];
    for (field, value, in_range, constraint) in checks {
        if !in_range(value) {
            return Err(ProtocolError::option_out_of_range(field, value, constraint));
        }
    }

    let fields: [(&str, FieldValue<'_>); 13] = [
        ("client_id", FieldValue::Bool(options.client_id)),
        ("hostname", FieldValue::Str(&options.hostname)),
        (
            "feature_negotiation",
            FieldValue::Bool(options.feature_negotiation),
        ),
        (
            "heartbeat_interval",
            FieldValue::Int(options.heartbeat_interval),
        ),
        (
            "output_buffer_size",
            FieldValue::Int(options.output_buffer_size),
        ),
        (
            "output_buffer_timeout",
            FieldValue::Int(options.output_buffer_timeout),
        ),
        ("tls_v1", FieldValue::Bool(options.tls_v1)),
        ("snappy", FieldValue::Bool(options.snappy)),
        ("deflate", FieldValue::Bool(options.deflate)),
        ("deflate_level", FieldValue::Int(options.deflate_level)),
        ("sample_rate", FieldValue::Int(options.sample_rate)),
        ("user_agent", FieldValue::Str(&options.user_agent)),
        ("msg_timeout", FieldValue::Int(options.msg_timeout)),
    ];

    let mut object = Vec::with_capacity(256);
    object.push(b'{');
    for (i, (name, value)) in fields.iter().enumerate() {
        if i > 0 {
            object.push(b',');
        }
        object.extend_from_slice(name.as_bytes());
        object.push(b':');
        match value {
            FieldValue::Bool(true) => object.extend_from_slice(b"true"),
            FieldValue::Bool(false) => object.extend_from_slice(b"false"),
            FieldValue::Int(n) => object.extend_from_slice(n.to_string().as_bytes()),
            FieldValue::Str(s) => object.extend_from_slice(s.as_bytes()),
        }
    }
    object.push(b'}');

    debug!(
        object_len = object.len(),
        feature_negotiation = options.feature_negotiation,
        "built identify payload"
    );

    let mut bytes = Vec::with_capacity(9 + 4 + object.len());
    bytes.extend_from_slice(b"IDENTIFY\n");
    wire::put_len_prefix(&mut bytes, object.len());
    bytes.extend_from_slice(&object);

    let expects = if options.feature_negotiation {
        ExpectedReply::Json
    } else {
        ExpectedReply::Ok
    };
    Ok(EncodedCommand {
        bytes,
        expects: Some(expects),
    })
}

/// SUB: bind this connection as a consumer of a topic/channel pair.
pub fn subscribe(topic: &str, channel: &str) -> ProtocolResult<EncodedCommand> {
    validation::check_topic(topic)?;
    validation::check_channel(channel)?;
    let bytes = format!("SUB {} {}\n", topic, channel).into_bytes();
    Ok(EncodedCommand {
        bytes,
        expects: Some(ExpectedReply::Ok),
    })
}

/// PUB: publish one message body to a topic.
pub fn publish(topic: &str, body: &[u8]) -> ProtocolResult<EncodedCommand> {
    validation::check_topic(topic)?;
    if body.is_empty() {
        return Err(ProtocolError::empty_body(0));
    }
    let mut bytes = Vec::with_capacity(4 + topic.len() + 1 + 4 + body.len());
    bytes.extend_from_slice(b"PUB ");
    bytes.extend_from_slice(topic.as_bytes());
    bytes.push(b'\n');
    wire::put_len_prefix(&mut bytes, body.len());
    bytes.extend_from_slice(body);
    Ok(EncodedCommand {
        bytes,
        expects: Some(ExpectedReply::Ok),
    })
}

/// DPUB: publish one message body whose delivery the daemon defers by
/// `defer_ms` milliseconds.
pub fn deferred_publish(topic: &str, defer_ms: i64, body: &[u8]) -> ProtocolResult<EncodedCommand> {
    validation::check_topic(topic)?;
    let defer_ms = validation::check_non_negative("defer_ms", defer_ms)?;
    if body.is_empty() {
        return Err(ProtocolError::empty_body(0));
    }
    let line = format!("DPUB {} {}\n", topic, defer_ms);
    let mut bytes = Vec::with_capacity(line.len() + 4 + body.len());
    bytes.extend_from_slice(line.as_bytes());
    wire::put_len_prefix(&mut bytes, body.len());
    bytes.extend_from_slice(body);
    Ok(EncodedCommand {
        bytes,
        expects: Some(ExpectedReply::Ok),
    })
}

/// MPUB: publish a batch of message bodies to a topic atomically.
///
/// The declared total covers a 4-byte slot per message plus every
/// length-prefixed body. Each body must be non-empty; a violation names the
/// offending index.
pub fn multi_publish<B: AsRef<[u8]>>(topic: &str, bodies: &[B]) -> ProtocolResult<EncodedCommand> {
    validation::check_topic(topic)?;
    if bodies.is_empty() {
        return Err(ProtocolError::EmptyBatch);
    }

    let mut blob = Vec::new();
    for (index, body) in bodies.iter().enumerate() {
        let body = body.as_ref();
        if body.is_empty() {
            return Err(ProtocolError::empty_body(index));
        }
        wire::put_len_prefix(&mut blob, body.len());
        blob.extend_from_slice(body);
    }
    let total = 4 * bodies.len() + blob.len();

    let mut bytes = Vec::with_capacity(5 + topic.len() + 1 + 8 + blob.len());
    bytes.extend_from_slice(b"MPUB ");
    bytes.extend_from_slice(topic.as_bytes());
    bytes.push(b'\n');
    wire::put_len_prefix(&mut bytes, total);
    bytes.extend_from_slice(&wire::encode_u32(bodies.len() as u32));
    bytes.extend_from_slice(&blob);
    Ok(EncodedCommand {
        bytes,
        expects: Some(ExpectedReply::Ok),
    })
}

/// RDY: set the flow-control window, the number of messages the daemon may
/// keep in flight to this connection.
pub fn ready(count: i64) -> ProtocolResult<EncodedCommand> {
    let count = validation::check_non_negative("count", count)?;
    let bytes = format!("RDY {}\n", count).into_bytes();
    Ok(EncodedCommand {
        bytes,
        expects: None,
    })
}

/// FIN: acknowledge successful processing of an in-flight message.
pub fn finish(message_id: &str) -> ProtocolResult<EncodedCommand> {
    validation::check_message_id(message_id)?;
    let bytes = format!("FIN {}\n", message_id).into_bytes();
    Ok(EncodedCommand {
        bytes,
        expects: None,
    })
}

/// REQ: return an in-flight message to the queue, redelivered after
/// `timeout_ms` milliseconds.
pub fn requeue(message_id: &str, timeout_ms: i64) -> ProtocolResult<EncodedCommand> {
    validation::check_message_id(message_id)?;
    let timeout_ms = validation::check_non_negative("timeout_ms", timeout_ms)?;
    let bytes = format!("REQ {} {}\n", message_id, timeout_ms).into_bytes();
    Ok(EncodedCommand {
        bytes,
        expects: None,
    })
}

/// TOUCH: reset the in-flight timeout of a message still being processed.
pub fn touch(message_id: &str) -> ProtocolResult<EncodedCommand> {
    validation::check_message_id(message_id)?;
    let bytes = format!("TOUCH {}\n", message_id).into_bytes();
    Ok(EncodedCommand {
        bytes,
        expects: None,
    })
}

/// CLS: start a clean shutdown; the daemon stops sending and acknowledges
/// with the close-wait keyword.
pub fn close() -> EncodedCommand {
    EncodedCommand {
        bytes: b"CLS\n".to_vec(),
        expects: Some(ExpectedReply::CloseWait),
    }
}

/// NOP: no-operation, the transport's reply to a heartbeat probe.
pub fn no_op() -> EncodedCommand {
    EncodedCommand {
        bytes: b"NOP\n".to_vec(),
        expects: None,
    }
}

/// AUTH: present a secret; the daemon answers with a JSON identity payload.
pub fn auth(secret: &[u8]) -> EncodedCommand {
    let mut bytes = Vec::with_capacity(5 + 4 + secret.len());
    bytes.extend_from_slice(b"AUTH\n");
    wire::put_len_prefix(&mut bytes, secret.len());
    bytes.extend_from_slice(secret);
    EncodedCommand {
        bytes,
        expects: Some(ExpectedReply::Json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::DEFAULT_USER_AGENT;

    #[test]
    fn magic_bytes() {
        let cmd = magic();
        assert_eq!(cmd.bytes, b"  V2");
        assert_eq!(cmd.expects, None);
    }

    #[test]
    fn reply_keywords() {
        assert_eq!(ExpectedReply::Ok.keyword(), Some(&b"OK"[..]));
        assert_eq!(ExpectedReply::CloseWait.keyword(), Some(&b"CLOSE_WAIT"[..]));
        assert_eq!(ExpectedReply::Json.keyword(), None);
    }

    #[test]
    fn subscribe_line() {
        let cmd = subscribe("events", "workers").expect("valid names");
        assert_eq!(cmd.bytes, b"SUB events workers\n");
        assert_eq!(cmd.expects, Some(ExpectedReply::Ok));
    }

    #[test]
    fn subscribe_rejects_bad_names() {
        assert_eq!(
            subscribe("bad topic", "c"),
            Err(ProtocolError::invalid_topic("bad topic"))
        );
        assert_eq!(
            subscribe("t", "bad/channel"),
            Err(ProtocolError::invalid_channel("bad/channel"))
        );
        assert!(subscribe("events#ephemeral", "workers#ephemeral").is_ok());
    }

    #[test]
    fn publish_frames_the_body() {
        let cmd = publish("events", b"hello").expect("valid publish");
        let mut expected = b"PUB events\n".to_vec();
        expected.extend_from_slice(&5u32.to_be_bytes());
        expected.extend_from_slice(b"hello");
        assert_eq!(cmd.bytes, expected);
        assert_eq!(cmd.expects, Some(ExpectedReply::Ok));
    }

    #[test]
    fn publish_rejects_empty_body() {
        assert_eq!(
            publish("events", b""),
            Err(ProtocolError::EmptyMessageBody { index: 0 })
        );
    }

    #[test]
    fn deferred_publish_carries_the_interval() {
        let cmd = deferred_publish("events", 1500, b"later").expect("valid dpub");
        let mut expected = b"DPUB events 1500\n".to_vec();
        expected.extend_from_slice(&5u32.to_be_bytes());
        expected.extend_from_slice(b"later");
        assert_eq!(cmd.bytes, expected);
        assert_eq!(cmd.expects, Some(ExpectedReply::Ok));

        assert!(deferred_publish("events", -1, b"x").is_err());
        assert!(deferred_publish("events", 0, b"").is_err());
    }

    #[test]
    fn multi_publish_counts_and_sizes() {
        let bodies: [&[u8]; 3] = [b"a", b"bb", b"ccc"];
        let cmd = multi_publish("t", &bodies).expect("valid batch");

        // size field covers a count slot per message plus each prefixed body
        let total = 4 * 3 + (4 + 1) + (4 + 2) + (4 + 3);
        assert_eq!(total, 30);

        let mut expected = b"MPUB t\n".to_vec();
        expected.extend_from_slice(&(total as u32).to_be_bytes());
        expected.extend_from_slice(&3u32.to_be_bytes());
        for body in bodies {
            expected.extend_from_slice(&(body.len() as u32).to_be_bytes());
            expected.extend_from_slice(body);
        }
        assert_eq!(cmd.bytes, expected);
        assert_eq!(cmd.expects, Some(ExpectedReply::Ok));
    }

    #[test]
    fn multi_publish_rejects_bad_batches() {
        let empty: [&[u8]; 0] = [];
        assert_eq!(multi_publish("t", &empty), Err(ProtocolError::EmptyBatch));

        let with_hole: [&[u8]; 3] = [b"a", b"", b"c"];
        assert_eq!(
            multi_publish("t", &with_hole),
            Err(ProtocolError::EmptyMessageBody { index: 1 })
        );
    }

    #[test]
    fn ready_validates_sign() {
        assert_eq!(ready(0).expect("zero is allowed").bytes, b"RDY 0\n");
        assert_eq!(ready(2500).expect("valid count").bytes, b"RDY 2500\n");
        assert_eq!(ready(0).expect("zero is allowed").expects, None);
        assert_eq!(
            ready(-1),
            Err(ProtocolError::NegativeArgument {
                argument: "count".to_string(),
                value: -1
            })
        );
    }

    #[test]
    fn in_flight_commands_take_hex_ids() {
        let id = "0123456789abcDEF";
        assert_eq!(
            finish(id).expect("valid id").bytes,
            format!("FIN {}\n", id).into_bytes()
        );
        assert_eq!(
            touch(id).expect("valid id").bytes,
            format!("TOUCH {}\n", id).into_bytes()
        );
        assert_eq!(
            requeue(id, 0).expect("valid requeue").bytes,
            format!("REQ {} 0\n", id).into_bytes()
        );
        assert_eq!(finish(id).expect("valid id").expects, None);

        assert!(finish("short").is_err());
        assert!(touch("0123456789abcdeg").is_err());
        assert!(requeue(id, -5).is_err());
    }

    #[test]
    fn close_and_nop() {
        assert_eq!(close().bytes, b"CLS\n");
        assert_eq!(close().expects, Some(ExpectedReply::CloseWait));
        assert_eq!(no_op().bytes, b"NOP\n");
        assert_eq!(no_op().expects, None);
    }

    #[test]
    fn auth_frames_the_secret() {
        let cmd = auth(b"s3cret");
        let mut expected = b"AUTH\n".to_vec();
        expected.extend_from_slice(&6u32.to_be_bytes());
        expected.extend_from_slice(b"s3cret");
        assert_eq!(cmd.bytes, expected);
        assert_eq!(cmd.expects, Some(ExpectedReply::Json));
    }

    #[test]
    fn identify_serializes_every_default() {
        let cmd = identify(&IdentifyOptions::default()).expect("defaults are valid");
        let object = format!(
            "{{client_id:false,hostname:localhost,feature_negotiation:false,\
             heartbeat_interval:0,output_buffer_size:0,output_buffer_timeout:0,\
             tls_v1:false,snappy:false,deflate:false,deflate_level:1,\
             sample_rate:0,user_agent:{},msg_timeout:0}}",
            DEFAULT_USER_AGENT
        );
        let mut expected = b"IDENTIFY\n".to_vec();
        expected.extend_from_slice(&(object.len() as u32).to_be_bytes());
        expected.extend_from_slice(object.as_bytes());
        assert_eq!(cmd.bytes, expected);
        assert_eq!(cmd.expects, Some(ExpectedReply::Ok));
    }

    #[test]
    fn identify_feature_negotiation_expects_json() {
        let options = IdentifyOptions {
            feature_negotiation: true,
            ..Default::default()
        };
        let cmd = identify(&options).expect("valid options");
        assert_eq!(cmd.expects, Some(ExpectedReply::Json));
    }

    #[test]
    fn identify_range_violations_name_the_key() {
        let options = IdentifyOptions {
            heartbeat_interval: 500,
            ..Default::default()
        };
        match identify(&options) {
            Err(ProtocolError::OptionOutOfRange { field, value, .. }) => {
                assert_eq!(field, "heartbeat_interval");
                assert_eq!(value, 500);
            }
            other => panic!("expected range error, got {:?}", other),
        }

        // -1 sentinels stay valid where the table allows them
        let disabled = IdentifyOptions {
            heartbeat_interval: -1,
            output_buffer_size: -1,
            output_buffer_timeout: -1,
            ..Default::default()
        };
        assert!(identify(&disabled).is_ok());

        assert!(identify(&IdentifyOptions {
            sample_rate: 100,
            ..Default::default()
        })
        .is_err());
        assert!(identify(&IdentifyOptions {
            deflate_level: 0,
            ..Default::default()
        })
        .is_err());
        assert!(identify(&IdentifyOptions {
            msg_timeout: 999,
            ..Default::default()
        })
        .is_err());
        // msg_timeout has no -1 sentinel
        assert!(identify(&IdentifyOptions {
            msg_timeout: -1,
            ..Default::default()
        })
        .is_err());
    }
}
