//! Queue Ticket Model

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{TableId, TicketId};

/// Ticket lifecycle status
///
/// ```text
/// PENDING --call--> CALLED --recall--> RE_CALLED
/// CALLED/RE_CALLED --arrived--> ARRIVED --served--> SERVED
/// CALLED/RE_CALLED --no_show--> NO_SHOW
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Pending,
    Called,
    ReCalled,
    Arrived,
    NoShow,
    Served,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 6] = [
        TicketStatus::Pending,
        TicketStatus::Called,
        TicketStatus::ReCalled,
        TicketStatus::Arrived,
        TicketStatus::NoShow,
        TicketStatus::Served,
    ];

    /// `SERVED` and `NO_SHOW` admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Served | Self::NoShow)
    }

    /// `CALLED` or `RE_CALLED`
    pub fn is_called(&self) -> bool {
        matches!(self, Self::Called | Self::ReCalled)
    }

    /// Statuses that can only exist with a table assigned
    pub fn requires_table(&self) -> bool {
        matches!(self, Self::Called | Self::ReCalled | Self::Arrived)
    }

    /// Label shown in the admin queue view
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Waiting",
            Self::Called => "Called",
            Self::ReCalled => "Called again",
            Self::Arrived => "Arrived",
            Self::NoShow => "No show",
            Self::Served => "Served",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Called => "CALLED",
            Self::ReCalled => "RE_CALLED",
            Self::Arrived => "ARRIVED",
            Self::NoShow => "NO_SHOW",
            Self::Served => "SERVED",
        };
        f.write_str(s)
    }
}

/// Queue ticket (one client's place in the queue)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Assigned by the backend, immutable
    pub id: TicketId,
    pub status: TicketStatus,
    /// Table handling this ticket; `None` while pending and unassigned
    #[serde(default)]
    pub table_id: Option<TableId>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub called_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub re_called_at: Option<NaiveDateTime>,
    /// Booked date (booking flow)
    #[serde(default)]
    pub slot_date: Option<NaiveDate>,
    /// Booked time (booking flow)
    #[serde(default)]
    pub slot_time: Option<NaiveTime>,
}

impl Ticket {
    /// Create a pending, unassigned walk-in ticket
    pub fn new(id: TicketId, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            status: TicketStatus::Pending,
            table_id: None,
            created_at,
            called_at: None,
            re_called_at: None,
            slot_date: None,
            slot_time: None,
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_table(mut self, table_id: TableId) -> Self {
        self.table_id = Some(table_id);
        self
    }

    pub fn with_slot(mut self, date: Option<NaiveDate>, time: NaiveTime) -> Self {
        self.slot_date = date;
        self.slot_time = Some(time);
        self
    }

    /// Effective ordering timestamp.
    ///
    /// A booked slot wins over the creation time. A slot time without a date
    /// is taken to be on the day the ticket was created.
    pub fn queue_instant(&self) -> NaiveDateTime {
        match self.slot_time {
            Some(time) => self
                .slot_date
                .unwrap_or_else(|| self.created_at.date())
                .and_time(time),
            None => self.created_at,
        }
    }

    /// Total order key: queue instant, then id
    pub fn queue_key(&self) -> (NaiveDateTime, TicketId) {
        (self.queue_instant(), self.id)
    }

    /// Most recent call time (re-call beats first call)
    pub fn last_called_at(&self) -> NaiveDateTime {
        self.re_called_at
            .or(self.called_at)
            .unwrap_or(self.created_at)
    }

    /// Whether the ticket is assigned to `table_id`
    pub fn is_at_table(&self, table_id: TableId) -> bool {
        self.table_id == Some(table_id)
    }
}
