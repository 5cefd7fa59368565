//! Payload codec
//!
//! Turns raw file bytes into the text blob stored in a snapshot and back.
//! The blob is gzip, then standard base64, hard-wrapped at [`LINE_WIDTH`]
//! columns with every line (including the last) terminated by `\n`.

use crate::error::DecodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Column width of an encoded blob.
pub const LINE_WIDTH: usize = 80;

/// Compress and text-encode `bytes` into a wrapped blob.
pub fn encode(bytes: &[u8]) -> std::io::Result<String> {
    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(bytes)?;
    let compressed = gz.finish()?;

    let b64 = STANDARD.encode(compressed);
    let mut blob = String::with_capacity(b64.len() + b64.len() / LINE_WIDTH + 1);
    // base64 output is pure ASCII, so byte chunks are char boundaries
    for line in b64.as_bytes().chunks(LINE_WIDTH) {
        blob.push_str(std::str::from_utf8(line).unwrap_or_default());
        blob.push('\n');
    }
    Ok(blob)
}

/// Invert [`encode`].
///
/// ASCII whitespace anywhere in the blob is ignored. A blob with no
/// non-whitespace content decodes to an empty buffer.
pub fn decode(blob: &str) -> Result<Vec<u8>, DecodeError> {
    let packed: Vec<u8> = blob
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if packed.is_empty() {
        return Ok(Vec::new());
    }

    let compressed = STANDARD.decode(packed)?;
    let mut out = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut out)
        .map_err(DecodeError::Gzip)?;
    Ok(out)
}
