//! Base64 framing of token segments.
//!
//! Segments are standard base64 with the `=` padding stripped. Decoding
//! restores the padding from the length and also accepts the URL-safe
//! alphabet.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

pub fn encode_segment(text: &str) -> String {
    STANDARD_NO_PAD.encode(text.as_bytes())
}

pub fn decode_segment(segment: &str) -> Result<String, base64::DecodeError> {
    let mut padded: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = STANDARD.decode(padded)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
