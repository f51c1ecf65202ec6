//! Text-encoding normalization for extracted subtitles.
//!
//! Romanian subtitles arrive in a mix of UTF-8 and legacy single-byte
//! encodings. Bytes go through a strict fallback chain, in order, and the
//! result is always rewritten as UTF-8 so diacritics render correctly.

use encoding_rs::{Encoding, ISO_8859_2, UTF_8, WINDOWS_1250};

/// Strict attempts, in order. Latin-1 is the final fallback; it accepts
/// every byte sequence, so decoding cannot fail.
const DECODE_CHAIN: &[&Encoding] = &[UTF_8, ISO_8859_2, WINDOWS_1250];

/// Decode subtitle bytes. Returns the text and the name of the encoding
/// that accepted it.
pub fn decode_subtitle(bytes: &[u8]) -> (String, &'static str) {
    decode_with_chain(bytes, DECODE_CHAIN)
}

fn decode_with_chain(bytes: &[u8], chain: &[&'static Encoding]) -> (String, &'static str) {
    for encoding in chain {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return (text.into_owned(), encoding.name());
        }
    }
    (encoding_rs::mem::decode_latin1(bytes).into_owned(), "latin1")
}
