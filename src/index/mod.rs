//! Chunk file access: the on-disk inverted-index format and its reader.
//!
//! One chunk is one self-contained index file covering a subset of the
//! document collection. The file starts with an 8-byte big-endian boundary
//! offset, followed by the lexicon region (newline-terminated term, i32
//! document frequency, u64 posting offset) and the posting region
//! (ascending doc ids, each trailed by a skippable hit-list payload).

pub mod reader;
pub mod types;

pub use reader::{ChunkReader, Lexicon};
pub use types::*;
