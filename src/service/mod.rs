//! Query service: the coordinator/worker handoff around one chunk reader.
//!
//! Any number of caller threads may invoke [`QueryHandler::query_doc_ids`]
//! concurrently; exactly one worker thread owns the [`ChunkReader`] and
//! performs every index read, so the posting store needs no internal
//! locking. The handoff runs over channels: an unbounded request channel
//! carries one token per enqueued query (the wake signal can never be
//! erased by a concurrent caller), and each request carries its own
//! one-shot completion channel back to the submitter.

mod worker;

use crate::error::Result;
use crate::index::reader::ChunkReader;
use crate::index::types::{ChunkId, DocId, NO_DOC};
use crossbeam_channel::{Sender, bounded, unbounded};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

pub(crate) use worker::QueryRequest;

/// The query-service capability: resolve query text to document ids.
///
/// The single method the surrounding network glue depends on. Alternate
/// backends (a multi-chunk federator, a mock in tests) substitute here
/// without touching the callers.
pub trait QueryHandler: Send + Sync {
    /// Resolve `query` to at most `limit` document ids.
    ///
    /// Always returns an array: matching ids in ascending order, an empty
    /// vector when nothing matched or the query failed inside the worker,
    /// or a `NO_DOC`-filled vector of length `limit` for empty query text
    /// and for a service that has been shut down.
    fn query_doc_ids(&self, limit: usize, query: &str) -> Vec<DocId>;
}

/// Query service for one index chunk.
///
/// Owns the worker thread, the request channel, and the kill flag. Dropping
/// the service disconnects the channel and joins the worker.
pub struct SearchService {
    requests: Option<Sender<QueryRequest>>,
    kill: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    chunk: ChunkId,
    term_count: usize,
}

impl SearchService {
    /// Open the chunk and start the worker thread that owns its reader.
    ///
    /// A missing or corrupt chunk file fails here with
    /// [`crate::Error::IndexUnavailable`]; nothing is spawned in that case.
    pub fn open(dir: &Path, chunk: ChunkId) -> Result<Self> {
        let reader = ChunkReader::open(dir, chunk)?;
        let term_count = reader.term_count();

        let (tx, rx) = unbounded();
        let kill = Arc::new(AtomicBool::new(false));
        let worker_kill = Arc::clone(&kill);
        let worker = std::thread::spawn(move || worker::run(reader, rx, worker_kill));

        Ok(Self {
            requests: Some(tx),
            kill,
            worker: Some(worker),
            chunk,
            term_count,
        })
    }

    /// Chunk served by this service.
    pub fn chunk(&self) -> ChunkId {
        self.chunk
    }

    /// Number of lexicon terms loaded by the reader.
    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// Flip the kill flag: subsequent queries return the sentinel array
    /// without being enqueued, and the worker exits after its current
    /// request.
    pub fn shutdown(&self) {
        self.kill.store(true, Ordering::Release);
    }

    fn sentinel(limit: usize) -> Vec<DocId> {
        vec![NO_DOC; limit]
    }
}

impl QueryHandler for SearchService {
    fn query_doc_ids(&self, limit: usize, query: &str) -> Vec<DocId> {
        let query = query.trim();
        if query.is_empty() || self.kill.load(Ordering::Acquire) {
            return Self::sentinel(limit);
        }

        let Some(requests) = self.requests.as_ref() else {
            return Self::sentinel(limit);
        };

        let (done_tx, done_rx) = bounded(1);
        let request = QueryRequest {
            text: query.to_string(),
            limit,
            done: done_tx,
        };

        if requests.send(request).is_err() {
            // Worker is gone; nothing will ever answer.
            return Self::sentinel(limit);
        }

        match done_rx.recv() {
            Ok(Some(ids)) => ids,
            // A failed query reads the same as "nothing matched".
            Ok(None) => Vec::new(),
            // Worker dropped the request mid-flight (killed or panicked).
            Err(_) => Self::sentinel(limit),
        }
    }
}

impl Drop for SearchService {
    fn drop(&mut self) {
        self.kill.store(true, Ordering::Release);
        // Disconnect the channel so the worker's recv unblocks.
        drop(self.requests.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
