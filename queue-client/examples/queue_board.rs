//! Public queue board
//!
//! Polls the backend and prints the called / re-called / waiting lists
//! whenever a new snapshot arrives. Stop with Ctrl+C.
//!
//! ```bash
//! QUEUE_BASE_URL=http://localhost:8081 cargo run -p queue-client --example queue_board
//! ```

use anyhow::Context;
use queue_client::{ClientConfig, SnapshotPoller, logger};
use queue_core::{BoardEntry, QueueBoard};
use tokio_util::sync::CancellationToken;

fn render(title: &str, entries: &[BoardEntry]) {
    println!("{}:", title);
    if entries.is_empty() {
        println!("  -");
    }
    for entry in entries {
        match entry.table_number {
            Some(number) => println!("  Ticket #{} -> table {}", entry.ticket_id, number),
            None => println!("  Ticket #{}", entry.ticket_id),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    logger::init_logger(&config);

    let client = config
        .build_http_client()
        .context("failed to build HTTP client")?;
    let shutdown = CancellationToken::new();
    let poller = SnapshotPoller::spawn(client, config.poll_interval(), shutdown.clone());
    let mut rx = poller.subscribe();

    tracing::info!(base_url = %config.base_url, "Queue board started");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                let board = QueueBoard::from_snapshot(&snapshot);
                println!();
                render("Called", &board.called);
                render("Called again", &board.re_called);
                render("Waiting", &board.pending);
            }
        }
    }

    shutdown.cancel();
    poller.join().await;
    Ok(())
}
