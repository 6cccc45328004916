//! Walk a canned daemon byte stream through the decoder, answering with the
//! commands a minimal consumer would send.
//!
//! Run with: cargo run -p codec --example protocol_demo

use codec::{decode_frame, finish, magic, no_op, ready, subscribe, Frame};

fn server_frame(frame_type: i32, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + body.len());
    out.extend_from_slice(&((4 + body.len()) as i32).to_be_bytes());
    out.extend_from_slice(&frame_type.to_be_bytes());
    out.extend_from_slice(body);
    out
}

fn main() {
    // what the client writes on connect
    println!("-> {:?}", String::from_utf8_lossy(&magic().bytes));
    let sub = subscribe("events", "demo").expect("valid names");
    println!(
        "-> {:?} (expects {:?})",
        String::from_utf8_lossy(&sub.bytes),
        sub.expects
    );
    let rdy = ready(1).expect("valid count");
    println!("-> {:?}", String::from_utf8_lossy(&rdy.bytes));

    // a canned reply stream: acknowledgement, heartbeat, one delivered message
    let mut stream = server_frame(0, b"OK");
    stream.extend_from_slice(&server_frame(0, b"_heartbeat_"));
    let mut inner = Vec::new();
    inner.extend_from_slice(&1_700_000_000_000_000_000i64.to_be_bytes());
    inner.extend_from_slice(&1u16.to_be_bytes());
    inner.extend_from_slice(b"0123456789abcdef");
    inner.extend_from_slice(b"hello from the daemon");
    stream.extend_from_slice(&server_frame(2, &inner));

    let mut offset = 0;
    while offset < stream.len() {
        let frame = decode_frame(&stream[offset..]);
        match frame {
            Frame::Response { payload, consumed } => {
                if frame.is_heartbeat() {
                    println!("<- heartbeat");
                    println!("-> {:?}", String::from_utf8_lossy(&no_op().bytes));
                } else {
                    println!("<- response {:?}", String::from_utf8_lossy(payload));
                }
                offset += consumed;
            }
            Frame::Error { payload, consumed } => {
                println!(
                    "<- error {:?} (code {:?})",
                    String::from_utf8_lossy(payload),
                    frame.error_code()
                );
                offset += consumed;
            }
            Frame::Message { message, consumed } => {
                println!(
                    "<- message id={} attempts={} body={:?}",
                    message.id_str().unwrap_or("<non-utf8>"),
                    message.attempts,
                    String::from_utf8_lossy(message.body),
                );
                if let Some(id) = message.id_str() {
                    let fin = finish(id).expect("decoded ids are valid");
                    println!("-> {:?}", String::from_utf8_lossy(&fin.bytes));
                }
                offset += consumed;
            }
            Frame::Partial { needed } => {
                println!("<- partial, waiting for {} more bytes", needed);
                break;
            }
            Frame::Invalid { .. } => {
                println!("<- invalid frame, dropping connection");
                break;
            }
        }
    }
}
