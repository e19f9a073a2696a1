//! Service Table Model

use serde::{Deserialize, Serialize};

use super::{OperatorId, TableId};

/// Table status, driven by operator claims rather than by tickets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
}

/// Physical service table an employee claims to serve tickets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    /// Number shown on the queue board
    pub number: i32,
    #[serde(default)]
    pub status: TableStatus,
    /// Employee currently claiming the table
    #[serde(default)]
    pub assigned_operator_id: Option<OperatorId>,
}

impl Table {
    pub fn new(id: TableId, number: i32) -> Self {
        Self {
            id,
            number,
            status: TableStatus::Free,
            assigned_operator_id: None,
        }
    }

    /// Mark the table as claimed by `operator_id`
    pub fn claimed_by(mut self, operator_id: OperatorId) -> Self {
        self.status = TableStatus::Occupied;
        self.assigned_operator_id = Some(operator_id);
        self
    }

    pub fn is_free(&self) -> bool {
        self.status == TableStatus::Free && self.assigned_operator_id.is_none()
    }

    pub fn is_claimed_by(&self, operator_id: OperatorId) -> bool {
        self.assigned_operator_id == Some(operator_id)
    }

    /// Free, or already ours
    pub fn is_available_to(&self, operator_id: OperatorId) -> bool {
        self.is_free() || self.is_claimed_by(operator_id)
    }
}
