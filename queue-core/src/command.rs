//! Operator commands handed to the action dispatcher

use serde::{Deserialize, Serialize};

use crate::models::{TableId, TicketId};

/// Action an operator can take on a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Call,
    Recall,
    Arrived,
    NoShow,
    Served,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Call,
        Action::Recall,
        Action::Arrived,
        Action::NoShow,
        Action::Served,
    ];

    /// Wire name, also used as the dispatch path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Recall => "recall",
            Self::Arrived => "arrived",
            Self::NoShow => "noShow",
            Self::Served => "served",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command payload: the exact request to send to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub action: Action,
    pub ticket_id: TicketId,
    pub table_id: TableId,
}
