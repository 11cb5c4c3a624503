use anyhow::Result;
use clap::{Parser, Subcommand};
use qix::index::ChunkId;
use qix::server::{IndexClient, daemon, is_daemon_running};
use qix::service::{QueryHandler, SearchService};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qix")]
#[command(about = "Query server for a chunked on-disk inverted document index")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the index server for one chunk (foreground)
    Serve {
        /// Chunk identifier to serve
        #[arg(short, long)]
        chunk: ChunkId,

        /// Directory holding the chunk files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Resolve a query to document ids (via the daemon when running)
    Query {
        /// Query text; whitespace terms are ANDed, `||` separates OR terms
        query: Vec<String>,

        /// Maximum number of ids to return
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Chunk identifier (used when no daemon is running)
        #[arg(short, long, default_value_t = 0)]
        chunk: ChunkId,

        /// Directory holding the chunk files (used when no daemon is running)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Show daemon status
    Status,
    /// Ping the daemon
    Ping,
    /// Stop the running daemon
    Stop,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { chunk, dir } => {
            daemon::run_foreground(&dir, chunk)?;
        }
        Commands::Query {
            query,
            limit,
            chunk,
            dir,
        } => {
            let text = query.join(" ");
            let ids = run_query(&text, limit, chunk, &dir)?;
            for id in ids {
                println!("{id}");
            }
        }
        Commands::Status => {
            let mut client = IndexClient::connect_required()?;
            let status = client.status()?;
            println!("chunk:         {:#018x}", status.chunk);
            println!("terms:         {}", status.term_count);
            println!("uptime:        {}s", status.uptime_secs);
            println!("queries:       {}", status.queries_served);
            println!("cache hits:    {:.1}%", status.cache_hit_rate * 100.0);
        }
        Commands::Ping => {
            let mut client = IndexClient::connect_required()?;
            client.ping()?;
            println!("pong");
        }
        Commands::Stop => {
            if !is_daemon_running() {
                println!("daemon is not running");
                return Ok(());
            }
            let mut client = IndexClient::connect_required()?;
            client.shutdown()?;
            println!("daemon stopped");
        }
    }

    Ok(())
}

/// Query through the daemon when one is up, otherwise open the chunk
/// directly for a one-shot answer.
fn run_query(text: &str, limit: usize, chunk: ChunkId, dir: &PathBuf) -> Result<Vec<i32>> {
    if let Some(mut client) = IndexClient::connect() {
        let result = client.query(text, limit)?;
        return Ok(result.doc_ids);
    }

    let service = SearchService::open(dir, chunk)?;
    Ok(service.query_doc_ids(limit, text))
}
