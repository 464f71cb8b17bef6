//! Identifier partitioning
//!
//! Splits the full identifier collection into fixed-size chunks.
//! The partition is exact: no identifier is duplicated or dropped,
//! global order is preserved, and only the last chunk may be shorter.

/// Split `ids` into chunks of `chunk_size`
///
/// A chunk size of zero is normalized to one.
pub fn partition(ids: &[String], chunk_size: usize) -> Vec<Vec<String>> {
    let chunk_size = chunk_size.max(1);
    ids.chunks(chunk_size).map(|chunk| chunk.to_vec()).collect()
}
