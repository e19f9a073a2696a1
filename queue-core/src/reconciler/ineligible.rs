//! Ineligibility reasons and command-build failures

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::command::Action;
use crate::error::{AppError, ErrorCode};
use crate::models::TicketId;

/// Why an action is not available right now
///
/// These are ordinary decision outcomes rendered as operator feedback,
/// never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ineligible {
    NoTableClaimed,
    WrongTable,
    TicketNotPending,
    TicketNotCalled,
    TicketNotArrived,
    TableBusyWithCalled,
    TableBusyWithArrived,
    AlreadyTerminal,
    UnknownTicket,
    /// Claim flow: the table is held by another operator
    TableOccupied,
    /// Claim flow: the table is not in the snapshot
    UnknownTable,
}

impl Ineligible {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoTableClaimed => ErrorCode::TableNotClaimed,
            Self::WrongTable => ErrorCode::WrongTable,
            Self::TicketNotPending => ErrorCode::TicketNotPending,
            Self::TicketNotCalled => ErrorCode::TicketNotCalled,
            Self::TicketNotArrived => ErrorCode::TicketNotArrived,
            Self::TableBusyWithCalled => ErrorCode::TableBusyWithCalled,
            Self::TableBusyWithArrived => ErrorCode::TableBusyWithArrived,
            Self::AlreadyTerminal => ErrorCode::TicketAlreadyTerminal,
            Self::UnknownTicket => ErrorCode::TicketNotFound,
            Self::TableOccupied => ErrorCode::TableOccupied,
            Self::UnknownTable => ErrorCode::TableNotFound,
        }
    }

    /// Operator-facing message, distinct per reason
    pub fn message(&self) -> &'static str {
        self.code().message()
    }
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for Ineligible {}

impl From<Ineligible> for AppError {
    fn from(reason: Ineligible) -> Self {
        AppError::new(reason.code())
    }
}

/// Failure to build a command from the latest snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Cannot {action} ticket {ticket_id}: {reason}")]
    PreconditionFailed {
        action: Action,
        ticket_id: TicketId,
        reason: Ineligible,
    },
}

impl CommandError {
    pub fn reason(&self) -> Ineligible {
        match self {
            Self::PreconditionFailed { reason, .. } => *reason,
        }
    }
}

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::PreconditionFailed {
                action,
                ticket_id,
                reason,
            } => AppError::new(reason.code())
                .with_detail("action", action.as_str())
                .with_detail("ticket_id", ticket_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ineligible; 11] = [
        Ineligible::NoTableClaimed,
        Ineligible::WrongTable,
        Ineligible::TicketNotPending,
        Ineligible::TicketNotCalled,
        Ineligible::TicketNotArrived,
        Ineligible::TableBusyWithCalled,
        Ineligible::TableBusyWithArrived,
        Ineligible::AlreadyTerminal,
        Ineligible::UnknownTicket,
        Ineligible::TableOccupied,
        Ineligible::UnknownTable,
    ];

    #[test]
    fn test_every_reason_has_its_own_message() {
        let mut messages: Vec<String> = ALL.iter().map(|r| r.to_string()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), ALL.len());
        assert!(messages.iter().all(|m| !m.is_empty()));
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(Ineligible::NoTableClaimed.code(), ErrorCode::TableNotClaimed);
        assert_eq!(Ineligible::AlreadyTerminal.code().code(), 4005);
    }

    #[test]
    fn test_command_error_into_app_error() {
        let err = CommandError::PreconditionFailed {
            action: Action::Call,
            ticket_id: 5,
            reason: Ineligible::TableBusyWithCalled,
        };
        assert_eq!(err.reason(), Ineligible::TableBusyWithCalled);
        assert!(err.to_string().contains("call ticket 5"));

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::TableBusyWithCalled);
        let details = app.details.unwrap();
        assert_eq!(details.get("action").unwrap(), "call");
        assert_eq!(details.get("ticket_id").unwrap(), 5);
    }
}
