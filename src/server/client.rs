//! Client for connecting to the index server daemon

use crate::index::types::DocId;
use crate::server::get_socket_path;
use crate::server::protocol::{Request, Response, StatusResponse, read_message, write_message};
use std::io::{BufReader, BufWriter};
use std::os::unix::net::UnixStream;
use std::time::Duration;
use thiserror::Error;

/// Read/write timeout
const IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server is not running
    #[error("index server is not running")]
    NotRunning,
    /// Communication error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Server returned an error
    #[error("server error: {0}")]
    Server(String),
    /// Unexpected response variant
    #[error("invalid response from server")]
    InvalidResponse,
}

/// Client for the index server
pub struct IndexClient {
    reader: BufReader<UnixStream>,
    writer: BufWriter<UnixStream>,
}

impl IndexClient {
    /// Try to connect to the running daemon.
    ///
    /// Returns `None` if the daemon is not running, so callers can fall
    /// back to opening the chunk directly.
    pub fn connect() -> Option<Self> {
        let socket_path = get_socket_path();

        if !socket_path.exists() {
            return None;
        }

        let stream = match UnixStream::connect(&socket_path) {
            Ok(s) => s,
            Err(_) => return None,
        };

        let _ = stream.set_read_timeout(Some(IO_TIMEOUT));
        let _ = stream.set_write_timeout(Some(IO_TIMEOUT));

        let reader = BufReader::new(stream.try_clone().ok()?);
        let writer = BufWriter::new(stream);

        Some(Self { reader, writer })
    }

    /// Connect or fail (for when the daemon is required).
    pub fn connect_required() -> ClientResult<Self> {
        Self::connect().ok_or(ClientError::NotRunning)
    }

    /// Resolve a query to document ids.
    pub fn query(&mut self, query: &str, limit: usize) -> ClientResult<QueryResult> {
        let request = Request::Query {
            query: query.to_string(),
            limit,
        };

        write_message(&mut self.writer, &request)?;
        let response: Response = read_message(&mut self.reader)?;

        match response {
            Response::Query(qr) => Ok(QueryResult {
                doc_ids: qr.doc_ids,
                duration_ms: qr.duration_ms,
                cached: qr.cached,
            }),
            Response::Error { message } => Err(ClientError::Server(message)),
            _ => Err(ClientError::InvalidResponse),
        }
    }

    /// Get server status.
    pub fn status(&mut self) -> ClientResult<StatusResponse> {
        write_message(&mut self.writer, &Request::Status)?;
        let response: Response = read_message(&mut self.reader)?;

        match response {
            Response::Status(status) => Ok(status),
            Response::Error { message } => Err(ClientError::Server(message)),
            _ => Err(ClientError::InvalidResponse),
        }
    }

    /// Request graceful shutdown.
    pub fn shutdown(&mut self) -> ClientResult<()> {
        write_message(&mut self.writer, &Request::Shutdown)?;
        let response: Response = read_message(&mut self.reader)?;

        match response {
            Response::ShuttingDown => Ok(()),
            Response::Error { message } => Err(ClientError::Server(message)),
            _ => Err(ClientError::InvalidResponse),
        }
    }

    /// Ping the server.
    pub fn ping(&mut self) -> ClientResult<()> {
        write_message(&mut self.writer, &Request::Ping)?;
        let response: Response = read_message(&mut self.reader)?;

        match response {
            Response::Pong => Ok(()),
            Response::Error { message } => Err(ClientError::Server(message)),
            _ => Err(ClientError::InvalidResponse),
        }
    }
}

/// Query result from the server
pub struct QueryResult {
    pub doc_ids: Vec<DocId>,
    pub duration_ms: f64,
    pub cached: bool,
}
