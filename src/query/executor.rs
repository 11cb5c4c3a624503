use crate::error::Result;
use crate::index::reader::ChunkReader;
use crate::index::types::{DocId, TermFreq};
use crate::query::merge::{intersect_ascending, union_ascending};
use crate::query::parser::{BooleanMode, ParsedQuery};
use crate::query::plan::order_terms;

/// Query executor: evaluates a parsed query against one chunk reader.
pub struct QueryExecutor<'a> {
    reader: &'a ChunkReader,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(reader: &'a ChunkReader) -> Self {
        Self { reader }
    }

    /// Evaluate a query and return at most `limit` ascending document ids.
    ///
    /// Terms are fetched rarest-first and folded pairwise through the merge
    /// for the query's mode. A term missing from the lexicon contributes an
    /// empty posting list: an AND query collapses to empty, an OR query
    /// proceeds with the remaining terms. Read failures inside the posting
    /// store propagate to the caller (the worker converts them to a null
    /// result); an empty merge outcome is not an error.
    pub fn execute(&self, query: &ParsedQuery, limit: usize) -> Result<Vec<DocId>> {
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let ordered = order_terms(&query.terms, |t| self.reader.doc_freq(t));
        let mut terms = ordered.into_iter();

        // Rarest term seeds the fold with its full posting list; the merges
        // below apply the limit cap.
        let mut results = match terms.next() {
            Some(tf) => self.term_postings(&tf)?,
            None => return Ok(Vec::new()),
        };

        for tf in terms {
            let postings = self.term_postings(&tf)?;
            results = match query.mode {
                BooleanMode::And => intersect_ascending(&postings, &results, limit),
                BooleanMode::Or => union_ascending(&postings, &results, limit),
            };
            if results.is_empty() && query.mode == BooleanMode::And {
                break;
            }
        }

        // Covers the single-term path, which never went through a merge.
        results.truncate(limit);

        if results.is_empty() {
            log::debug!("no results for {:?}", query.terms);
        }
        Ok(results)
    }

    fn term_postings(&self, tf: &TermFreq) -> Result<Vec<DocId>> {
        if tf.n_docs == 0 {
            // Absent from the lexicon (or genuinely empty): zero results
            // for this term, never an error.
            return Ok(Vec::new());
        }
        self.reader.postings_for(&tf.term, tf.n_docs as usize)
    }
}
