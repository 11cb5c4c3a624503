//! Query parsing, planning, and execution.
//!
//! A query is a flat list of terms combined with one boolean mode: AND
//! (whitespace-delimited) or OR (`||`-delimited). The planner orders terms
//! by ascending document frequency so the merge starts from the smallest
//! candidate set; the executor folds pairwise sorted merges over the
//! ordered postings.

pub mod executor;
pub mod merge;
pub mod parser;
pub mod plan;

pub use executor::QueryExecutor;
pub use parser::{BooleanMode, ParsedQuery, parse_query};
pub use plan::order_terms;
