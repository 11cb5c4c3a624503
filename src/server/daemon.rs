//! Unix index server daemon
//!
//! Keeps one chunk's lexicon loaded and serves doc-id queries over a Unix
//! socket. All query evaluation goes through the owned [`SearchService`];
//! the daemon adds caching, statistics, and the socket lifecycle.

use crate::index::types::{ChunkId, DocId};
use crate::server::protocol::{
    QueryResponse, Request, Response, StatusResponse, read_message, write_message,
};
use crate::server::{get_pid_path, get_socket_path};
use crate::service::{QueryHandler, SearchService};
use anyhow::{Context, Result};
use lru::LruCache;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::num::NonZeroUsize;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// LRU cache size for query results
const CACHE_SIZE: usize = 128;

/// Connection timeout
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Statistics for the server
struct ServerStats {
    start_time: Instant,
    queries_served: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl ServerStats {
    fn new() -> Self {
        Self {
            start_time: Instant::now(),
            queries_served: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
        }
    }

    fn cache_hit_rate(&self) -> f32 {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f32 / total as f32
        }
    }
}

/// The index server daemon
pub struct IndexServer {
    service: SearchService,
    /// Results keyed by (query text, limit); the limit caps merges, so the
    /// same text at a different limit is a different result.
    query_cache: Mutex<LruCache<(String, usize), Vec<DocId>>>,
    stats: ServerStats,
    shutdown: AtomicBool,
}

impl IndexServer {
    /// Create a new index server around an opened service.
    pub fn new(service: SearchService) -> Arc<Self> {
        Arc::new(Self {
            service,
            query_cache: Mutex::new(LruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap())),
            stats: ServerStats::new(),
            shutdown: AtomicBool::new(false),
        })
    }

    /// Start the server (blocking).
    pub fn run(self: &Arc<Self>) -> Result<()> {
        let socket_path = get_socket_path();
        let pid_path = get_pid_path();

        if let Some(parent) = socket_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Remove stale socket file
        if socket_path.exists() {
            fs::remove_file(&socket_path)?;
        }

        fs::write(&pid_path, format!("{}", std::process::id()))?;

        let listener = UnixListener::bind(&socket_path)
            .with_context(|| format!("Failed to bind to {}", socket_path.display()))?;

        // Socket is user-only
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&socket_path, fs::Permissions::from_mode(0o600))?;
        }

        eprintln!(
            "qixd: serving chunk {:#018x} ({} terms) on {}",
            self.service.chunk(),
            self.service.term_count(),
            socket_path.display()
        );

        for stream in listener.incoming() {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }

            match stream {
                Ok(stream) => {
                    let _ = stream.set_read_timeout(Some(CONNECTION_TIMEOUT));
                    let _ = stream.set_write_timeout(Some(CONNECTION_TIMEOUT));

                    let server = Arc::clone(self);
                    thread::spawn(move || {
                        if let Err(e) = server.handle_connection(stream) {
                            eprintln!("qixd: connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("qixd: accept error: {}", e);
                }
            }
        }

        let _ = fs::remove_file(&socket_path);
        let _ = fs::remove_file(&pid_path);
        eprintln!("qixd: stopped");

        Ok(())
    }

    /// Handle a single client connection.
    fn handle_connection(&self, stream: UnixStream) -> Result<()> {
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut writer = BufWriter::new(stream);

        loop {
            let request: Request = match read_message(&mut reader) {
                Ok(req) => req,
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    // Client disconnected
                    break;
                }
                Err(e) => {
                    let resp = Response::Error {
                        message: format!("Invalid request: {}", e),
                    };
                    write_message(&mut writer, &resp)?;
                    continue;
                }
            };

            let response = self.handle_request(request);
            write_message(&mut writer, &response)?;

            if matches!(response, Response::ShuttingDown) {
                break;
            }
        }

        Ok(())
    }

    /// Handle a single request.
    fn handle_request(&self, request: Request) -> Response {
        match request {
            Request::Query { query, limit } => self.handle_query(query, limit),

            Request::Status => Response::Status(StatusResponse {
                uptime_secs: self.stats.start_time.elapsed().as_secs(),
                chunk: self.service.chunk(),
                term_count: self.service.term_count(),
                queries_served: self.stats.queries_served.load(Ordering::Relaxed),
                cache_hit_rate: self.stats.cache_hit_rate(),
            }),

            Request::Shutdown => {
                self.shutdown.store(true, Ordering::Relaxed);
                self.service.shutdown();
                // The accept loop only rechecks the flag on the next
                // connection; nudge it so stop is prompt.
                let _ = UnixStream::connect(get_socket_path());
                Response::ShuttingDown
            }

            Request::Ping => Response::Pong,
        }
    }

    /// Resolve a query, via the cache when possible.
    fn handle_query(&self, query: String, limit: usize) -> Response {
        let start = Instant::now();
        let key = (query, limit);

        if let Ok(mut cache) = self.query_cache.lock()
            && let Some(ids) = cache.get(&key)
        {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            self.stats.queries_served.fetch_add(1, Ordering::Relaxed);

            return Response::Query(QueryResponse {
                doc_ids: ids.clone(),
                duration_ms: start.elapsed().as_secs_f64() * 1000.0,
                cached: true,
            });
        }

        self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);

        let doc_ids = self.service.query_doc_ids(limit, &key.0);

        if let Ok(mut cache) = self.query_cache.lock() {
            cache.put(key, doc_ids.clone());
        }

        self.stats.queries_served.fetch_add(1, Ordering::Relaxed);

        Response::Query(QueryResponse {
            doc_ids,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
            cached: false,
        })
    }
}

/// Run the daemon in the foreground for the given chunk.
pub fn run_foreground(dir: &Path, chunk: ChunkId) -> Result<()> {
    let service = SearchService::open(dir, chunk)
        .with_context(|| format!("Failed to open chunk {:#018x}", chunk))?;
    let server = IndexServer::new(service);
    server.run()
}
