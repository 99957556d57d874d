//! Wire format: length-prefixed protobuf framing
//!
//! Every message on the TCP link is framed as:
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ Payload (variable)       │
//! │ Little-endian u32│ Protobuf SapientMessage  │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! - **Length field**: 4-byte little-endian unsigned integer
//! - **Payload**: serialized [`SapientMessage`] wrapper
//! - **Maximum payload**: 32 MiB; a length of zero or beyond the cap means
//!   the peer's framer has desynchronised and the connection must be torn down

use crate::error::{Error, Result};
use crate::proto::SapientMessage;
use prost::Message;

/// Maximum accepted frame payload.
pub const MAX_FRAME_LEN: u32 = 32 * 1024 * 1024;

/// Size of the length prefix.
pub const FRAME_HEADER_LEN: usize = 4;

/// Encode a frame: length prefix followed by the payload.
pub fn encode_frame(body: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(body.len()).map_err(|_| Error::Frame(u32::MAX))?;
    if len == 0 || len > MAX_FRAME_LEN {
        return Err(Error::Frame(len));
    }
    let mut frame = Vec::with_capacity(FRAME_HEADER_LEN + body.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(body);
    Ok(frame)
}

/// Decode a length prefix, validating it against the frame cap.
pub fn decode_frame_len(header: [u8; FRAME_HEADER_LEN]) -> Result<usize> {
    let len = u32::from_le_bytes(header);
    if len == 0 || len > MAX_FRAME_LEN {
        return Err(Error::Frame(len));
    }
    Ok(len as usize)
}

/// Serializer for the wrapper message.
#[derive(Clone, Copy, Default)]
pub struct Serializer;

impl Serializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a wrapper message to its payload bytes.
    pub fn encode(&self, msg: &SapientMessage) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(msg.encoded_len());
        msg.encode(&mut buf)?;
        Ok(buf)
    }

    /// Deserialize payload bytes into a wrapper message.
    pub fn decode(&self, bytes: &[u8]) -> Result<SapientMessage> {
        Ok(SapientMessage::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{alert, Alert, SapientMessage, Timestamp};
    use crate::proto::sapient_message::Content;

    fn sample_message() -> SapientMessage {
        SapientMessage {
            timestamp: Some(Timestamp {
                seconds: 1_700_000_000,
                nanos: 42,
            }),
            node_id: "7b2100d5-2da3-44e3-8726-9d4b93b8a04d".to_string(),
            content: Some(Content::Alert(Alert {
                alert_id: "01HXYZ0000000000000000AAAA".to_string(),
                alert_type: Some(alert::AlertType::Information as i32),
                status: Some(alert::AlertStatus::Active as i32),
                description: Some("system alert".to_string()),
            })),
        }
    }

    #[test]
    fn frame_roundtrip() {
        let body = Serializer::new().encode(&sample_message()).unwrap();
        let frame = encode_frame(&body).unwrap();

        let mut header = [0u8; FRAME_HEADER_LEN];
        header.copy_from_slice(&frame[..FRAME_HEADER_LEN]);
        let len = decode_frame_len(header).unwrap();
        assert_eq!(len, body.len());

        let decoded = Serializer::new().decode(&frame[FRAME_HEADER_LEN..]).unwrap();
        assert_eq!(decoded, sample_message());
    }

    #[test]
    fn rejects_empty_frame() {
        assert!(matches!(encode_frame(&[]), Err(Error::Frame(0))));
        assert!(matches!(decode_frame_len([0, 0, 0, 0]), Err(Error::Frame(0))));
    }

    #[test]
    fn accepts_max_frame() {
        let body = vec![0u8; MAX_FRAME_LEN as usize];
        let frame = encode_frame(&body).unwrap();
        assert_eq!(frame.len(), FRAME_HEADER_LEN + body.len());

        let mut header = [0u8; FRAME_HEADER_LEN];
        header.copy_from_slice(&frame[..FRAME_HEADER_LEN]);
        assert_eq!(decode_frame_len(header).unwrap(), MAX_FRAME_LEN as usize);
    }

    #[test]
    fn rejects_oversize_frame() {
        let header = (MAX_FRAME_LEN + 1).to_le_bytes();
        assert!(matches!(
            decode_frame_len(header),
            Err(Error::Frame(n)) if n == MAX_FRAME_LEN + 1
        ));

        // Encoding a body one byte past the cap must fail the same way.
        let body = vec![0u8; MAX_FRAME_LEN as usize + 1];
        assert!(matches!(
            encode_frame(&body),
            Err(Error::Frame(n)) if n == MAX_FRAME_LEN + 1
        ));
    }

    #[test]
    fn length_prefix_is_little_endian() {
        let frame = encode_frame(&[0xAB; 5]).unwrap();
        assert_eq!(&frame[..4], &[5, 0, 0, 0]);
    }
}
