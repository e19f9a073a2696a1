//! Seams between the reconciler and the network
//!
//! The poller only needs a [`SnapshotSource`] and the session only needs a
//! [`CommandDispatcher`], so both can run against in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use queue_core::{Command, Snapshot};

use crate::ClientResult;

/// Produces complete, validated snapshots
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> ClientResult<Snapshot>;
}

/// Delivers operator commands to the backend
#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    async fn send(&self, command: &Command) -> ClientResult<()>;
}

#[async_trait]
impl<T: SnapshotSource + ?Sized> SnapshotSource for Arc<T> {
    async fn fetch(&self) -> ClientResult<Snapshot> {
        (**self).fetch().await
    }
}

#[async_trait]
impl<T: CommandDispatcher + ?Sized> CommandDispatcher for Arc<T> {
    async fn send(&self, command: &Command) -> ClientResult<()> {
        (**self).send(command).await
    }
}
