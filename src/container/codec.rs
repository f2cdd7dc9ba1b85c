//! Container byte layout
//!
//! ```text
//! [payload_length : u64 LE][payload][metadata JSON][metadata_length : u64 LE]
//! ```
//!
//! The payload is located from the front length field and the metadata from
//! the trailing one. The two are read independently; the trailing length is
//! what locates the metadata, never `8 + payload_length`.

use super::types::{Container, Metadata};
use crate::error::{CexError, Result};

/// Width of each length field
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Smallest buffer that can hold both length fields
pub const MIN_CONTAINER_SIZE: usize = 2 * LENGTH_FIELD_SIZE;

/// Serialize payload and metadata into container bytes
pub fn encode(payload: &[u8], metadata: &Metadata) -> Result<Vec<u8>> {
    let metadata_text = serde_json::to_string_pretty(metadata)
        .map_err(|e| CexError::MetadataParseError(e.to_string()))?;
    let metadata_bytes = metadata_text.as_bytes();

    let mut out =
        Vec::with_capacity(MIN_CONTAINER_SIZE + payload.len() + metadata_bytes.len());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(metadata_bytes);
    out.extend_from_slice(&(metadata_bytes.len() as u64).to_le_bytes());
    Ok(out)
}

/// Parse container bytes back into payload and metadata
pub fn decode(bytes: &[u8]) -> Result<Container> {
    if bytes.len() < MIN_CONTAINER_SIZE {
        return Err(CexError::CorruptContainer(format!(
            "file is {} bytes, shorter than the {}-byte minimum",
            bytes.len(),
            MIN_CONTAINER_SIZE
        )));
    }

    let payload = read_payload(bytes)?;
    let metadata_text = read_metadata_text(bytes)?;
    let metadata = parse_metadata(metadata_text)?;

    tracing::debug!(
        payload_len = payload.len(),
        metadata_len = metadata_text.len(),
        entry_point = %metadata.entry_point,
        "container decoded"
    );

    Ok(Container::new(payload.to_vec(), metadata))
}

fn read_length(field: &[u8]) -> u64 {
    let mut buf = [0u8; LENGTH_FIELD_SIZE];
    buf.copy_from_slice(&field[..LENGTH_FIELD_SIZE]);
    u64::from_le_bytes(buf)
}

/// Front-anchored: `[L1][L1 bytes]`
fn read_payload(bytes: &[u8]) -> Result<&[u8]> {
    let declared = read_length(&bytes[..LENGTH_FIELD_SIZE]);
    let trailer_start = bytes.len() - LENGTH_FIELD_SIZE;
    let available = trailer_start - LENGTH_FIELD_SIZE;

    let len = usize::try_from(declared)
        .ok()
        .filter(|&len| len <= available)
        .ok_or_else(|| {
            CexError::CorruptContainer(format!(
                "payload length {} exceeds the {} bytes remaining",
                declared, available
            ))
        })?;

    Ok(&bytes[LENGTH_FIELD_SIZE..LENGTH_FIELD_SIZE + len])
}

/// Tail-anchored: `[L2 bytes][L2]` ending at the end of the buffer
fn read_metadata_text(bytes: &[u8]) -> Result<&[u8]> {
    let trailer_start = bytes.len() - LENGTH_FIELD_SIZE;
    let declared = read_length(&bytes[trailer_start..]);

    let start = usize::try_from(declared)
        .ok()
        .and_then(|len| trailer_start.checked_sub(len))
        .ok_or_else(|| {
            CexError::CorruptContainer(format!(
                "metadata length {} points before the start of a {}-byte file",
                declared,
                bytes.len()
            ))
        })?;

    Ok(&bytes[start..trailer_start])
}

fn parse_metadata(text: &[u8]) -> Result<Metadata> {
    let text = std::str::from_utf8(text)
        .map_err(|e| CexError::MetadataParseError(format!("metadata is not UTF-8: {}", e)))?;
    serde_json::from_str(text).map_err(|e| CexError::MetadataParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(payload: &[u8]) {
        let metadata = Metadata::new("hello.py");
        let bytes = encode(payload, &metadata).unwrap();
        let container = decode(&bytes).unwrap();
        assert_eq!(container.payload, payload);
        assert_eq!(container.metadata, metadata);
    }

    /// Hand-built container with arbitrary length fields
    fn raw(l1: u64, payload: &[u8], metadata: &[u8], l2: u64) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&l1.to_le_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(metadata);
        out.extend_from_slice(&l2.to_le_bytes());
        out
    }

    #[test]
    fn test_round_trip_empty_payload() {
        round_trip(&[]);
    }

    #[test]
    fn test_round_trip_single_byte() {
        round_trip(&[0x7f]);
    }

    #[test]
    fn test_round_trip_one_mebibyte() {
        let payload: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect();
        round_trip(&payload);
    }

    #[test]
    fn test_extra_metadata_fields_survive() {
        let mut metadata = Metadata::new("tool.rb");
        metadata.extra.insert("author".to_string(), json!("someone"));
        metadata.extra.insert("revision".to_string(), json!(4));

        let decoded = decode(&encode(b"puts 1", &metadata).unwrap()).unwrap();
        assert_eq!(decoded.metadata, metadata);
    }

    #[test]
    fn test_layout_is_little_endian() {
        let bytes = encode(b"abc", &Metadata::new("a.py")).unwrap();
        assert_eq!(&bytes[..8], &[3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..11], b"abc");

        let meta_len = bytes.len() - 8 - 11;
        let tail = &bytes[bytes.len() - 8..];
        assert_eq!(u64::from_le_bytes(tail.try_into().unwrap()), meta_len as u64);

        let text = std::str::from_utf8(&bytes[11..bytes.len() - 8]).unwrap();
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value, json!({ "entry_point": "a.py" }));
    }

    #[test]
    fn test_empty_buffer_is_corrupt() {
        assert!(matches!(decode(&[]), Err(CexError::CorruptContainer(_))));
    }

    #[test]
    fn test_short_buffer_is_corrupt() {
        for len in 1..MIN_CONTAINER_SIZE {
            let bytes = vec![0u8; len];
            assert!(
                matches!(decode(&bytes), Err(CexError::CorruptContainer(_))),
                "length {} should be rejected",
                len
            );
        }
    }

    #[test]
    fn test_payload_length_past_end_is_corrupt() {
        let meta = br#"{"entry_point":"a.py"}"#;
        let bytes = raw(1000, b"abc", meta, meta.len() as u64);
        assert!(matches!(decode(&bytes), Err(CexError::CorruptContainer(_))));

        let bytes = raw(u64::MAX, b"abc", meta, meta.len() as u64);
        assert!(matches!(decode(&bytes), Err(CexError::CorruptContainer(_))));
    }

    #[test]
    fn test_metadata_length_before_start_is_corrupt() {
        let meta = br#"{"entry_point":"a.py"}"#;
        let bytes = raw(3, b"abc", meta, 10_000);
        assert!(matches!(decode(&bytes), Err(CexError::CorruptContainer(_))));

        let bytes = raw(3, b"abc", meta, u64::MAX);
        assert!(matches!(decode(&bytes), Err(CexError::CorruptContainer(_))));
    }

    #[test]
    fn test_metadata_located_from_tail_only() {
        // Padding between payload and metadata is skipped because the tail
        // length alone places the metadata.
        let meta = br#"{"entry_point":"a.py"}"#;
        let mut middle = b"PADDING".to_vec();
        middle.extend_from_slice(meta);
        let bytes = raw(3, b"abc", &middle, meta.len() as u64);

        let container = decode(&bytes).unwrap();
        assert_eq!(container.payload, b"abc");
        assert_eq!(container.entry_point(), "a.py");
    }

    #[test]
    fn test_malformed_metadata() {
        let meta = b"{not json";
        let bytes = raw(0, b"", meta, meta.len() as u64);
        assert!(matches!(decode(&bytes), Err(CexError::MetadataParseError(_))));
    }

    #[test]
    fn test_metadata_without_entry_point() {
        let meta = br#"{"name":"a.py"}"#;
        let bytes = raw(0, b"", meta, meta.len() as u64);
        assert!(matches!(decode(&bytes), Err(CexError::MetadataParseError(_))));

        let meta = br#"{"entry_point":42}"#;
        let bytes = raw(0, b"", meta, meta.len() as u64);
        assert!(matches!(decode(&bytes), Err(CexError::MetadataParseError(_))));
    }

    #[test]
    fn test_metadata_not_utf8() {
        let meta = [0xff, 0xfe, 0xfd];
        let bytes = raw(0, b"", &meta, meta.len() as u64);
        assert!(matches!(decode(&bytes), Err(CexError::MetadataParseError(_))));
    }

    #[test]
    fn test_zero_length_metadata() {
        let bytes = raw(0, b"", b"", 0);
        assert!(matches!(decode(&bytes), Err(CexError::MetadataParseError(_))));
    }
}
