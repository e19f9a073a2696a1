//! Unified error codes for the queue desk
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Queue (ticket) errors
//! - 7xxx: Table errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they survive the trip
/// through JSON unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Cannot delete admin user
    CannotDeleteAdmin = 2005,

    // ==================== 4xxx: Queue ====================
    /// Ticket is not in the current snapshot
    TicketNotFound = 4001,
    /// Ticket is not waiting to be called
    TicketNotPending = 4002,
    /// Ticket has not been called
    TicketNotCalled = 4003,
    /// Ticket holder has not arrived
    TicketNotArrived = 4004,
    /// Ticket is already served or marked as no-show
    TicketAlreadyTerminal = 4005,
    /// Snapshot failed consistency checks
    SnapshotMalformed = 4101,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is claimed by another operator
    TableOccupied = 7002,
    /// Operator has not claimed a table
    TableNotClaimed = 7003,
    /// Ticket belongs to a different table
    WrongTable = 7004,
    /// Table already has a called ticket
    TableBusyWithCalled = 7005,
    /// Table is still serving an arrived ticket
    TableBusyWithArrived = 7006,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee email already registered
    EmployeeEmailExists = 8002,
    /// Last and first name are required
    EmployeeNameRequired = 8010,
    /// Email address is malformed
    EmployeeInvalidEmail = 8011,
    /// Phone number is required
    EmployeePhoneRequired = 8012,
    /// Password is too short
    PasswordTooShort = 8013,
    /// Role not found
    RoleNotFound = 8101,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication failed, please sign in again",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::CannotDeleteAdmin => "The primary administrator cannot be deleted",

            // Queue
            ErrorCode::TicketNotFound => "Ticket is no longer in the queue",
            ErrorCode::TicketNotPending => "Ticket is not waiting to be called",
            ErrorCode::TicketNotCalled => "Ticket has not been called yet",
            ErrorCode::TicketNotArrived => "Client has not arrived at the table yet",
            ErrorCode::TicketAlreadyTerminal => "Ticket is already closed",
            ErrorCode::SnapshotMalformed => "Queue data received from the server is inconsistent",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableOccupied => "Table is taken by another employee",
            ErrorCode::TableNotClaimed => "Select a table first",
            ErrorCode::WrongTable => "Ticket is assigned to another table",
            ErrorCode::TableBusyWithCalled => "A client has already been called to this table",
            ErrorCode::TableBusyWithArrived => "Finish serving the current client first",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already registered",
            ErrorCode::EmployeeNameRequired => "Last name and first name are required",
            ErrorCode::EmployeeInvalidEmail => "Invalid email",
            ErrorCode::EmployeePhoneRequired => "Phone number is required",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters",
            ErrorCode::RoleNotFound => "Select a valid role",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Server is unreachable, check the connection",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2005 => Ok(ErrorCode::CannotDeleteAdmin),

            // Queue
            4001 => Ok(ErrorCode::TicketNotFound),
            4002 => Ok(ErrorCode::TicketNotPending),
            4003 => Ok(ErrorCode::TicketNotCalled),
            4004 => Ok(ErrorCode::TicketNotArrived),
            4005 => Ok(ErrorCode::TicketAlreadyTerminal),
            4101 => Ok(ErrorCode::SnapshotMalformed),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableOccupied),
            7003 => Ok(ErrorCode::TableNotClaimed),
            7004 => Ok(ErrorCode::WrongTable),
            7005 => Ok(ErrorCode::TableBusyWithCalled),
            7006 => Ok(ErrorCode::TableBusyWithArrived),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeEmailExists),
            8010 => Ok(ErrorCode::EmployeeNameRequired),
            8011 => Ok(ErrorCode::EmployeeInvalidEmail),
            8012 => Ok(ErrorCode::EmployeePhoneRequired),
            8013 => Ok(ErrorCode::PasswordTooShort),
            8101 => Ok(ErrorCode::RoleNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
