use crate::error::{Error, Result};
use crate::index::types::{ChunkId, DocId, LexiconEntry, chunk_path};
use memmap2::Mmap;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Fixed byte length of a lexicon record after the term: i32 document
/// frequency plus u64 posting offset.
const RECORD_FIXED_LEN: u64 = 12;

/// Prefix byte value that switches the hit-list length to the long form.
const LONG_FORM: u8 = 0xff;

/// The in-memory lexicon of one chunk: term -> (document frequency,
/// posting offset), plus the boundary offset from the file header.
pub struct Lexicon {
    entries: FxHashMap<String, LexiconEntry>,
    boundary: u64,
}

impl Lexicon {
    /// Parse the header and lexicon region from the start of a chunk file.
    ///
    /// The first 8 bytes are the big-endian boundary offset where the
    /// lexicon region logically ends. Records follow: a newline-terminated
    /// term, then the 12 fixed bytes. The running byte total that is
    /// compared against the boundary counts the term bytes and the fixed
    /// bytes but NOT the newline; the index writer accounted this way, so
    /// any other accounting misaligns every subsequent record.
    pub fn parse(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < 8 {
            return Err(invalid_chunk("file shorter than its 8-byte header"));
        }
        let mut header = [0u8; 8];
        header.copy_from_slice(&bytes[0..8]);
        let boundary = u64::from_be_bytes(header);
        if boundary < 8 {
            return Err(invalid_chunk(format!(
                "lexicon boundary {boundary} points inside the header"
            )));
        }

        let mut entries = FxHashMap::default();
        let mut consumed: u64 = 8;
        let mut pos: usize = 8;

        while consumed < boundary {
            let newline = memchr::memchr(b'\n', &bytes[pos..])
                .ok_or_else(|| invalid_chunk("unterminated term in lexicon"))?;
            let term = std::str::from_utf8(&bytes[pos..pos + newline])
                .map_err(|_| invalid_chunk("non-UTF-8 term in lexicon"))?
                .to_string();
            pos += newline + 1;
            consumed += newline as u64;

            if bytes.len() < pos + RECORD_FIXED_LEN as usize {
                return Err(invalid_chunk(format!(
                    "truncated record for term {term:?}"
                )));
            }
            let mut buf4 = [0u8; 4];
            buf4.copy_from_slice(&bytes[pos..pos + 4]);
            let n_docs = u32::from_be_bytes(buf4);
            let mut buf8 = [0u8; 8];
            buf8.copy_from_slice(&bytes[pos + 4..pos + 12]);
            let offset = u64::from_be_bytes(buf8);
            pos += RECORD_FIXED_LEN as usize;
            consumed += RECORD_FIXED_LEN;

            entries.insert(term, LexiconEntry { n_docs, offset });
        }

        Ok(Self { entries, boundary })
    }

    pub fn get(&self, term: &str) -> Option<&LexiconEntry> {
        self.entries.get(term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offset where the lexicon region logically ends.
    pub fn boundary(&self) -> u64 {
        self.boundary
    }
}

/// Reader for a single index chunk.
///
/// Opens the chunk file, loads the full lexicon into memory (this is the
/// startup cost), and serves random-access posting reads out of a memory
/// map. The lexicon is immutable after load; a `ChunkReader` shared behind
/// a reference is safe to read from exactly one thread at a time, which the
/// service layer guarantees by owning it on the worker thread.
pub struct ChunkReader {
    path: PathBuf,
    chunk: ChunkId,
    map: Mmap,
    lexicon: Lexicon,
}

impl ChunkReader {
    /// Open the chunk file for the given identifier and load its lexicon.
    pub fn open(dir: &Path, chunk: ChunkId) -> Result<Self> {
        let path = chunk_path(dir, chunk);
        let file = File::open(&path)
            .map_err(|e| Error::index_unavailable(&path, e.to_string()))?;
        let map = unsafe { Mmap::map(&file) }
            .map_err(|e| Error::index_unavailable(&path, e.to_string()))?;
        let lexicon = Lexicon::parse(&map)
            .map_err(|e| Error::index_unavailable(&path, e.to_string()))?;

        Ok(Self {
            path,
            chunk,
            map,
            lexicon,
        })
    }

    pub fn chunk(&self) -> ChunkId {
        self.chunk
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of terms in the lexicon.
    pub fn term_count(&self) -> usize {
        self.lexicon.len()
    }

    /// Document frequency for a term, if present.
    pub fn doc_freq(&self, term: &str) -> Option<u32> {
        self.lexicon.get(term).map(|e| e.n_docs)
    }

    /// Read the posting list for a term: ascending document ids, capped at
    /// `min(limit, n_docs)`.
    ///
    /// Each posting is a 4-byte big-endian id followed by a hit-list
    /// payload that is skipped, never parsed. A term absent from the
    /// lexicon or a read past the end of the file yields
    /// [`Error::PostingsUnavailable`]; the query path treats both as zero
    /// results for the term.
    pub fn postings_for(&self, term: &str, limit: usize) -> Result<Vec<DocId>> {
        let entry = self
            .lexicon
            .get(term)
            .ok_or_else(|| Error::postings_unavailable(term, "term not in lexicon"))?;

        let limit = limit.min(entry.n_docs as usize);
        let mut out = Vec::with_capacity(limit);
        let mut pos = entry.offset as usize;

        for found in 0..limit {
            let id = read_doc_id(&self.map, pos).ok_or_else(|| {
                Error::postings_unavailable(term, "posting read past end of chunk")
            })?;
            pos += 4;
            out.push(id);

            // No skip after the final id; its hit list is never visited.
            if found + 1 < limit {
                pos = skip_hit_list(&self.map, pos).ok_or_else(|| {
                    Error::postings_unavailable(term, "hit list runs past end of chunk")
                })?;
            }
        }

        Ok(out)
    }
}

fn invalid_chunk(reason: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, reason.into())
}

fn read_doc_id(bytes: &[u8], pos: usize) -> Option<DocId> {
    let raw = bytes.get(pos..pos + 4)?;
    let arr: [u8; 4] = raw.try_into().ok()?;
    Some(i32::from_be_bytes(arr))
}

/// Advance past one hit-list payload and return the offset of the next
/// posting.
///
/// The length is self-describing: a prefix byte below 0xFF encodes the
/// short form (skip `prefix * 2 + 1` bytes after it); 0xFF switches to the
/// long form, where a big-endian u16 carries the count and `count * 2 + 3`
/// bytes follow it. The constants are the index writer's; they must match
/// it byte for byte. The returned offset may point past the end of the
/// map; like a file seek, it only fails at the next read.
pub(crate) fn skip_hit_list(bytes: &[u8], pos: usize) -> Option<usize> {
    let prefix = *bytes.get(pos)?;
    if prefix < LONG_FORM {
        Some(pos + 1 + prefix as usize * 2 + 1)
    } else {
        let raw = bytes.get(pos + 1..pos + 3)?;
        let arr: [u8; 2] = raw.try_into().ok()?;
        let count = u16::from_be_bytes(arr) as usize;
        Some(pos + 3 + count * 2 + 3)
    }
}
