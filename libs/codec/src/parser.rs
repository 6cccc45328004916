//! # Frame Decoder
//!
//! ## Purpose
//!
//! Zero-copy decoder for daemon-to-client frames. Given whatever bytes the
//! transport has accumulated, it decodes the first complete frame and reports
//! exactly how many bytes it consumed, or how many more it needs. Decoded
//! payloads and message bodies borrow from the input buffer; nothing is
//! copied or allocated on the decode path.
//!
//! ## Failure Policy
//!
//! Decoding never returns an error. Truncation is `Frame::Partial` carrying
//! the byte deficit; malformed input is `Frame::Invalid` carrying the extent
//! that may be skipped (zero when the length prefix itself cannot be
//! trusted). The caller chooses whether to wait for more bytes or drop the
//! connection; the decoder only classifies.
//!
//! ## Performance Profile
//!
//! - **Zero-Copy**: message headers are overlaid on the buffer via
//!   `zerocopy::Ref`; payloads are subslices of the input
//! - **Allocation**: none on any decode path
//! - **Thread Safety**: pure function of its input, safe for concurrent use

use crate::wire;
use tracing::warn;
use types::protocol::frame::{Frame, FrameType, Message, MessageHeader};
use types::{
    FRAME_HEADER_SIZE, FRAME_SIZE_PREFIX, MAX_PAYLOAD_SIZE, MIN_FRAME_PAYLOAD, MIN_MESSAGE_PAYLOAD,
};
use zerocopy::Ref;

/// Decode the first frame in `buf` with the default payload ceiling.
///
/// Only the first frame is decoded per call. After a non-partial outcome the
/// caller advances its buffer offset by `consumed` and calls again; after a
/// partial outcome it reads at least `needed` more bytes first. Transports
/// that negotiated a different daemon frame limit should use
/// [`decode_frame_with_limit`] instead.
pub fn decode_frame(buf: &[u8]) -> Frame<'_> {
    decode_frame_with_limit(buf, MAX_PAYLOAD_SIZE)
}

/// Decode the first frame in `buf`, honoring declared payloads up to
/// `max_payload` bytes.
pub fn decode_frame_with_limit(buf: &[u8], max_payload: usize) -> Frame<'_> {
    if buf.len() < FRAME_SIZE_PREFIX {
        return Frame::Partial {
            needed: FRAME_SIZE_PREFIX - buf.len(),
        };
    }

    // The size prefix is attacker-controlled input. Read it signed and bound
    // it before any arithmetic on it; a declared payload below the type
    // field's own size, or above the ceiling, makes the whole prefix
    // untrustworthy, so nothing is safely consumable.
    let declared = wire::read_i32(buf, 0);
    if declared < MIN_FRAME_PAYLOAD as i32 || declared as usize > max_payload {
        warn!(declared, max_payload, "unusable frame payload length");
        return Frame::Invalid { consumed: 0 };
    }
    let payload_len = declared as usize;

    let available = buf.len() - FRAME_SIZE_PREFIX;
    if available < payload_len {
        return Frame::Partial {
            needed: payload_len - available,
        };
    }

    let frame_end = FRAME_SIZE_PREFIX + payload_len;
    let raw_type = wire::read_i32(buf, FRAME_SIZE_PREFIX);
    match FrameType::try_from(raw_type) {
        Ok(FrameType::Response) => Frame::Response {
            payload: &buf[FRAME_HEADER_SIZE..frame_end],
            consumed: frame_end,
        },
        Ok(FrameType::Error) => Frame::Error {
            payload: &buf[FRAME_HEADER_SIZE..frame_end],
            consumed: frame_end,
        },
        Ok(FrameType::Message) => {
            decode_message(&buf[FRAME_HEADER_SIZE..frame_end], payload_len, frame_end)
        }
        Err(_) => {
            warn!(raw_type, "unknown frame type");
            Frame::Invalid { consumed: frame_end }
        }
    }
}

/// Overlay the fixed message header on the frame body and slice out the rest.
fn decode_message(after_type: &[u8], payload_len: usize, frame_end: usize) -> Frame<'_> {
    if payload_len < MIN_MESSAGE_PAYLOAD {
        warn!(payload_len, "message frame shorter than its fixed header");
        return Frame::Invalid { consumed: frame_end };
    }

    // payload_len >= MIN_MESSAGE_PAYLOAD guarantees the header fits; the
    // fallthrough keeps the no-panic contract regardless.
    let (header, body) = match Ref::<_, MessageHeader>::new_unaligned_from_prefix(after_type) {
        Some(split) => split,
        None => return Frame::Invalid { consumed: frame_end },
    };
    let header = header.into_ref();

    Frame::Message {
        message: Message {
            timestamp_ns: header.timestamp_ns.get(),
            attempts: header.attempts.get(),
            id: &header.id,
            body,
        },
        consumed: frame_end,
    }
}
