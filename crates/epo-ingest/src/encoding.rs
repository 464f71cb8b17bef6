//! Byte-encoding detection and lossy decoding
//!
//! The portability exports arrive in a mix of encodings (UTF-8,
//! Windows-1252, sometimes double-encoded). Detection never fails:
//! the detector's top guess is always used, and decoding replaces
//! unresolvable bytes with U+FFFD instead of aborting.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Detect the most likely encoding of a raw byte buffer
///
/// Always returns an encoding, even on low-confidence input.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decode a byte buffer with the detected encoding
///
/// Returns the decoded text and whether any byte had to be replaced
/// with the U+FFFD placeholder.
pub fn decode_lossy(bytes: &[u8]) -> (String, bool) {
    let encoding = detect_encoding(bytes);
    let (text, _, had_errors) = encoding.decode(bytes);
    (text.into_owned(), had_errors)
}
