use crate::index::reader::ChunkReader;
use crate::index::types::DocId;
use crate::query::QueryExecutor;
use crate::query::parser::parse_query;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One pending query, handed from a coordinator to the worker.
///
/// `done` is the single-fire completion signal: `Some(ids)` on success,
/// `None` when evaluation failed inside the posting store. Dropped unsent
/// (worker killed), the coordinator observes the disconnect instead.
pub(crate) struct QueryRequest {
    pub text: String,
    pub limit: usize,
    pub done: Sender<Option<Vec<DocId>>>,
}

/// Worker loop: the only thread that touches the chunk reader.
///
/// Blocks on the request channel between queries, a cooperative wait that
/// one enqueued request releases for exactly one iteration. Ends when the
/// kill flag is set or every sender is gone.
pub(crate) fn run(reader: ChunkReader, requests: Receiver<QueryRequest>, kill: Arc<AtomicBool>) {
    let executor = QueryExecutor::new(&reader);

    while let Ok(request) = requests.recv() {
        if kill.load(Ordering::Acquire) {
            // Drop the request; its coordinator sees the hang-up and
            // returns the sentinel array.
            break;
        }

        let parsed = parse_query(&request.text);
        let result = match executor.execute(&parsed, request.limit) {
            Ok(ids) => Some(ids),
            Err(err) => {
                log::warn!(
                    "query {:?} failed on chunk {:#x}: {err}",
                    request.text,
                    reader.chunk()
                );
                None
            }
        };

        // The coordinator may have given up; a dead receiver is fine.
        let _ = request.done.send(result);
    }
}
