use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Identifier of a document within a chunk.
///
/// Signed on the wire: the chunk format stores 32-bit big-endian integers,
/// and `-1` is reserved as the "no result" sentinel.
pub type DocId = i32;

/// Identifier of one self-contained index chunk file.
pub type ChunkId = u64;

/// Sentinel document id used to fill results for empty or killed queries.
pub const NO_DOC: DocId = -1;

/// Lexicon entry for one term: how many documents contain it, and the
/// absolute byte offset of its posting list in the chunk file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconEntry {
    pub n_docs: u32,
    pub offset: u64,
}

/// A query term paired with its document frequency, ordered so that the
/// rarest term sorts first. Frequencies are copied out of the lexicon at
/// planning time and never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFreq {
    pub term: String,
    pub n_docs: u32,
}

impl TermFreq {
    pub fn new(term: impl Into<String>, n_docs: u32) -> Self {
        Self {
            term: term.into(),
            n_docs,
        }
    }
}

impl Ord for TermFreq {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ascending document frequency; term text breaks ties so the
        // evaluation order is deterministic.
        self.n_docs
            .cmp(&other.n_docs)
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for TermFreq {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// File name of a chunk: the identifier as fixed-width hexadecimal.
pub fn chunk_file_name(chunk: ChunkId) -> String {
    format!("chunk{:016x}.index", chunk)
}

/// Full path of a chunk file under the index directory.
pub fn chunk_path(dir: &Path, chunk: ChunkId) -> PathBuf {
    dir.join(chunk_file_name(chunk))
}
