//! Read-only projections that need no operator context
//!
//! - [`QueueBoard`]: the public display (called / re-called / waiting)
//! - [`QueueSummary`]: the admin view of the whole queue

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{Ticket, TicketId, TicketStatus};
use crate::snapshot::Snapshot;

/// One line on the public board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    pub ticket_id: TicketId,
    /// `None` while the ticket has no table
    pub table_number: Option<i32>,
}

/// Public queue display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueBoard {
    /// By call time
    pub called: Vec<BoardEntry>,
    /// By re-call time
    pub re_called: Vec<BoardEntry>,
    /// In queue order
    pub pending: Vec<BoardEntry>,
}

impl QueueBoard {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let entry = |ticket: &Ticket| BoardEntry {
            ticket_id: ticket.id,
            table_number: ticket
                .table_id
                .and_then(|id| snapshot.table(id))
                .map(|table| table.number),
        };

        let mut called: Vec<_> = snapshot
            .tickets()
            .iter()
            .filter(|t| t.status == TicketStatus::Called)
            .collect();
        called.sort_by_key(|t| (t.called_at.unwrap_or(t.created_at), t.id));

        let mut re_called: Vec<_> = snapshot
            .tickets()
            .iter()
            .filter(|t| t.status == TicketStatus::ReCalled)
            .collect();
        re_called.sort_by_key(|t| (t.last_called_at(), t.id));

        let mut pending: Vec<_> = snapshot
            .tickets()
            .iter()
            .filter(|t| t.status == TicketStatus::Pending)
            .collect();
        pending.sort_by_key(|t| t.queue_key());

        Self {
            called: called.into_iter().map(entry).collect(),
            re_called: re_called.into_iter().map(entry).collect(),
            pending: pending.into_iter().map(entry).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.called.is_empty() && self.re_called.is_empty() && self.pending.is_empty()
    }
}

/// One ticket in the admin queue list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub ticket_id: TicketId,
    pub status: TicketStatus,
    pub status_label: &'static str,
    pub table_number: Option<i32>,
    pub queue_instant: NaiveDateTime,
}

/// Admin overview: per-status counts and every ticket in queue order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueSummary {
    /// In [`TicketStatus::ALL`] order, zero counts included
    pub counts: Vec<(TicketStatus, usize)>,
    pub rows: Vec<SummaryRow>,
}

impl QueueSummary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let counts = TicketStatus::ALL
            .into_iter()
            .map(|status| {
                let n = snapshot
                    .tickets()
                    .iter()
                    .filter(|t| t.status == status)
                    .count();
                (status, n)
            })
            .collect();

        let mut tickets: Vec<_> = snapshot.tickets().iter().collect();
        tickets.sort_by_key(|t| t.queue_key());
        let rows = tickets
            .into_iter()
            .map(|t| SummaryRow {
                ticket_id: t.id,
                status: t.status,
                status_label: t.status.label(),
                table_number: t.table_id.and_then(|id| snapshot.table(id)).map(|tb| tb.number),
                queue_instant: t.queue_instant(),
            })
            .collect();

        Self { counts, rows }
    }

    pub fn count(&self, status: TicketStatus) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }

    /// Tickets not yet served or dismissed
    pub fn open(&self) -> usize {
        self.counts
            .iter()
            .filter(|(s, _)| !s.is_terminal())
            .map(|(_, n)| n)
            .sum()
    }
}
