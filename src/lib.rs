//! # QIX - Inverted Index Query Server
//!
//! QIX is the query-serving core of a document search engine: it opens one
//! precomputed on-disk inverted-index chunk and resolves boolean AND/OR
//! term queries to ranked document ids.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Chunk file format: lexicon loading and posting reads
//! - [`query`] - Query parsing, frequency-ordered planning, sorted merges
//! - [`service`] - Coordinator/worker handoff serializing all index reads
//! - [`server`] - Unix-socket daemon and client around the service
//!
//! ## Quick Start
//!
//! ```ignore
//! use qix::service::{QueryHandler, SearchService};
//! use std::path::Path;
//!
//! // Open chunk 0 and start its worker thread
//! let service = SearchService::open(Path::new("/var/lib/qix"), 0).unwrap();
//!
//! // Whitespace terms are ANDed; `||` switches to OR
//! let ids = service.query_doc_ids(10, "cat dog");
//!
//! for id in ids {
//!     println!("{id}");
//! }
//! ```
//!
//! ## Concurrency model
//!
//! Any number of threads may query a [`service::SearchService`]
//! concurrently. Exactly one worker thread owns the chunk reader and
//! performs every index read; requests reach it over a channel carrying
//! one token per query, and each request carries its own one-shot
//! completion channel back. The lexicon is immutable after load.

pub mod error;
pub mod index;
pub mod query;
pub mod server;
pub mod service;

pub use error::{Error, Result};
