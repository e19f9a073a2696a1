//! Queue Client - HTTP client for the queue backend
//!
//! Fetches snapshots, dispatches operator commands and keeps one operator's
//! session in sync with the backend.

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod poller;
pub mod session;
pub mod transport;
pub mod wire;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::QueueHttpClient;
pub use poller::SnapshotPoller;
pub use session::{OperatorSession, SessionError};
pub use transport::{CommandDispatcher, SnapshotSource};

// Re-export core types for convenience
pub use queue_core::{Action, Command, Snapshot};
