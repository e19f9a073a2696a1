//! Data models
//!
//! Shared between the reconciler and the HTTP client.
//! All IDs are `i64`, as assigned by the backend.

pub mod employee;
pub mod table;
pub mod ticket;

pub type TicketId = i64;
pub type TableId = i64;
pub type EmployeeId = i64;
/// An operator is the employee acting at a table
pub type OperatorId = EmployeeId;

// Re-exports
pub use employee::*;
pub use table::*;
pub use ticket::*;
