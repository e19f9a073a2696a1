//! Queue desk core
//!
//! Domain types and the pure ticket-lifecycle reconciler, shared by the
//! HTTP client and any view layer on top of it.

pub mod board;
pub mod command;
pub mod error;
pub mod models;
pub mod reconciler;
pub mod snapshot;

// Re-exports
pub use board::{BoardEntry, QueueBoard, QueueSummary, SummaryRow};
pub use command::{Action, Command};
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{
    Employee, EmployeeCreate, EmployeeId, EmployeeRole, OperatorId, Table, TableId, TableStatus,
    Ticket, TicketId, TicketStatus,
};
pub use reconciler::{CommandError, Eligibility, Ineligible, Partition};
pub use snapshot::{Snapshot, SnapshotError, SnapshotPayload};
