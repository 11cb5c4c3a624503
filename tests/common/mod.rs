//! Shared test fixture: writes chunk files in the wire format the reader
//! consumes.

use qix::index::{ChunkId, DocId, chunk_path};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One term entry: term text, ascending doc ids, and the hit count stored
/// for every posting (255 or more exercises the long-form length prefix).
pub type TermEntry<'a> = (&'a str, &'a [DocId], u16);

/// Write a chunk file.
///
/// Layout: 8-byte big-endian boundary, lexicon records (term + `\n` +
/// u32 doc frequency + u64 absolute posting offset), then the posting
/// region. The boundary uses the writer's accounting: term bytes plus the
/// 12 fixed bytes per record, newlines not counted.
pub fn write_chunk(dir: &Path, chunk: ChunkId, entries: &[TermEntry]) {
    let boundary: u64 = 8 + entries
        .iter()
        .map(|(term, _, _)| term.len() as u64 + 12)
        .sum::<u64>();
    let lexicon_end: u64 = 8 + entries
        .iter()
        .map(|(term, _, _)| term.len() as u64 + 1 + 12)
        .sum::<u64>();

    let mut lexicon = Vec::new();
    let mut postings = Vec::new();

    for (term, ids, hits) in entries {
        lexicon.extend_from_slice(term.as_bytes());
        lexicon.push(b'\n');
        lexicon.extend_from_slice(&(ids.len() as u32).to_be_bytes());
        lexicon.extend_from_slice(&(lexicon_end + postings.len() as u64).to_be_bytes());

        for id in *ids {
            postings.extend_from_slice(&id.to_be_bytes());
            if *hits < 0xff {
                // Short form: prefix byte, then hits*2+1 payload bytes.
                postings.push(*hits as u8);
                postings.extend(std::iter::repeat_n(0u8, *hits as usize * 2 + 1));
            } else {
                // Long form: 0xFF, u16 count, then count*2+3 payload bytes.
                postings.push(0xff);
                postings.extend_from_slice(&hits.to_be_bytes());
                postings.extend(std::iter::repeat_n(0u8, *hits as usize * 2 + 3));
            }
        }
    }

    let mut out = Vec::new();
    out.extend_from_slice(&boundary.to_be_bytes());
    out.extend_from_slice(&lexicon);
    out.extend_from_slice(&postings);

    let mut file = File::create(chunk_path(dir, chunk)).unwrap();
    file.write_all(&out).unwrap();
}

/// Reference lexicon used across the suites: `cat -> [5, 9, 20]`,
/// `dog -> [2, 5, 9, 30, 41]`, plus a high-frequency filler term.
pub fn write_cat_dog_chunk(dir: &Path, chunk: ChunkId) {
    write_chunk(
        dir,
        chunk,
        &[
            ("cat", &[5, 9, 20], 1),
            ("dog", &[2, 5, 9, 30, 41], 3),
            ("the", &[1, 2, 3, 5, 8, 9, 13, 20, 30, 34, 41, 55], 0),
        ],
    );
}
