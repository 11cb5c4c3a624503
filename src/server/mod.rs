//! Socket front end for the query service.
//!
//! Thin I/O glue around the core: a daemon that owns a [`SearchService`]
//! and answers length-prefixed requests over a Unix socket, and a client
//! the CLI uses to reach it. Query evaluation itself never happens here.
//!
//! [`SearchService`]: crate::service::SearchService

mod client;
pub mod daemon;
mod protocol;

pub use client::IndexClient;
pub use protocol::{QueryResponse, Request, Response, StatusResponse};

use std::path::PathBuf;

/// Socket path for the index server, per-user runtime directory first.
pub fn get_socket_path() -> PathBuf {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        return PathBuf::from(runtime_dir).join("qix.sock");
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".local").join("run").join("qix.sock");
    }

    let uid = unsafe { libc::getuid() };
    PathBuf::from(format!("/tmp/qix-{}.sock", uid))
}

/// PID file path for the daemon.
pub fn get_pid_path() -> PathBuf {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        return PathBuf::from(runtime_dir).join("qix.pid");
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".local").join("run").join("qix.pid");
    }

    let uid = unsafe { libc::getuid() };
    PathBuf::from(format!("/tmp/qix-{}.pid", uid))
}

/// Check whether a daemon process is alive according to its pid file.
pub fn is_daemon_running() -> bool {
    let pid_path = get_pid_path();
    if !pid_path.exists() {
        return false;
    }

    if let Ok(pid_str) = std::fs::read_to_string(&pid_path)
        && let Ok(pid) = pid_str.trim().parse::<i32>()
    {
        // Signal 0 probes for existence without sending anything.
        return unsafe { libc::kill(pid, 0) } == 0;
    }

    false
}
