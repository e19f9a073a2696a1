//! Queue snapshot - complete point-in-time view of tickets and tables
//!
//! A snapshot is only obtainable through [`Snapshot::ingest`], which rejects
//! malformed data. Every new snapshot replaces the previous one wholesale;
//! there is no incremental merge, since status transitions do not commute
//! (a stale `CALLED` merged over a fresh `SERVED` would revive a closed ticket).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{Table, TableId, Ticket, TicketId, TicketStatus};

/// Raw snapshot as received from the fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPayload {
    pub tickets: Vec<Ticket>,
    pub tables: Vec<Table>,
}

/// Consistency failure detected while ingesting a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("Ticket {0} appears more than once")]
    DuplicateTicket(TicketId),

    #[error("Table {0} appears more than once")]
    DuplicateTable(TableId),

    #[error("Ticket {ticket_id} references unknown table {table_id}")]
    UnknownTableReference {
        ticket_id: TicketId,
        table_id: TableId,
    },

    #[error("Ticket {ticket_id} is {status} but has no table")]
    MissingTableAssignment {
        ticket_id: TicketId,
        status: TicketStatus,
    },

    #[error("Table {table_id} has tickets {first} and {second} active at the same time")]
    ConflictingActiveTickets {
        table_id: TableId,
        first: TicketId,
        second: TicketId,
    },
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        AppError::new(ErrorCode::SnapshotMalformed).with_detail("reason", err.to_string())
    }
}

/// Validated, indexed, read-only snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    tickets: Vec<Ticket>,
    tables: Vec<Table>,
    ticket_index: HashMap<TicketId, usize>,
    table_index: HashMap<TableId, usize>,
}

impl Snapshot {
    /// Validate and index a raw snapshot
    pub fn ingest(tickets: Vec<Ticket>, tables: Vec<Table>) -> Result<Self, SnapshotError> {
        let mut table_index = HashMap::with_capacity(tables.len());
        for (pos, table) in tables.iter().enumerate() {
            if table_index.insert(table.id, pos).is_some() {
                return Err(SnapshotError::DuplicateTable(table.id));
            }
        }

        let mut ticket_index = HashMap::with_capacity(tickets.len());
        // table -> ticket currently called / arrived there
        let mut called: HashMap<TableId, TicketId> = HashMap::new();
        let mut arrived: HashMap<TableId, TicketId> = HashMap::new();

        for (pos, ticket) in tickets.iter().enumerate() {
            if ticket_index.insert(ticket.id, pos).is_some() {
                return Err(SnapshotError::DuplicateTicket(ticket.id));
            }

            let table_id = match ticket.table_id {
                Some(table_id) => table_id,
                None if ticket.status.requires_table() => {
                    return Err(SnapshotError::MissingTableAssignment {
                        ticket_id: ticket.id,
                        status: ticket.status,
                    });
                }
                None => continue,
            };

            if !table_index.contains_key(&table_id) {
                return Err(SnapshotError::UnknownTableReference {
                    ticket_id: ticket.id,
                    table_id,
                });
            }

            let slot = match ticket.status {
                TicketStatus::Called | TicketStatus::ReCalled => Some(&mut called),
                TicketStatus::Arrived => Some(&mut arrived),
                _ => None,
            };
            if let Some(slot) = slot
                && let Some(first) = slot.insert(table_id, ticket.id)
            {
                return Err(SnapshotError::ConflictingActiveTickets {
                    table_id,
                    first,
                    second: ticket.id,
                });
            }
        }

        tracing::debug!(
            tickets = tickets.len(),
            tables = tables.len(),
            "Snapshot ingested"
        );

        Ok(Self {
            tickets,
            tables,
            ticket_index,
            table_index,
        })
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.ticket_index.get(&id).map(|&pos| &self.tickets[pos])
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.table_index.get(&id).map(|&pos| &self.tables[pos])
    }

    /// Tickets assigned to `table_id`
    pub fn tickets_at(&self, table_id: TableId) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(move |t| t.is_at_table(table_id))
    }

    /// The ticket in `CALLED`/`RE_CALLED` at `table_id`, if any
    pub fn called_at_table(&self, table_id: TableId) -> Option<&Ticket> {
        self.tickets_at(table_id).find(|t| t.status.is_called())
    }

    /// The ticket in `ARRIVED` at `table_id`, if any
    pub fn arrived_at_table(&self, table_id: TableId) -> Option<&Ticket> {
        self.tickets_at(table_id)
            .find(|t| t.status == TicketStatus::Arrived)
    }
}

impl TryFrom<SnapshotPayload> for Snapshot {
    type Error = SnapshotError;

    fn try_from(payload: SnapshotPayload) -> Result<Self, Self::Error> {
        Snapshot::ingest(payload.tickets, payload.tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 17)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn tables() -> Vec<Table> {
        vec![Table::new(1, 1), Table::new(2, 2)]
    }

    #[test]
    fn test_ingest_valid_snapshot() {
        let tickets = vec![
            Ticket::new(1, t0()),
            Ticket::new(2, t0())
                .with_status(TicketStatus::Called)
                .with_table(1),
            Ticket::new(3, t0())
                .with_status(TicketStatus::Arrived)
                .with_table(1),
            Ticket::new(4, t0())
                .with_status(TicketStatus::Served)
                .with_table(2),
        ];
        let snapshot = Snapshot::ingest(tickets, tables()).unwrap();

        assert_eq!(snapshot.tickets().len(), 4);
        assert_eq!(snapshot.ticket(3).unwrap().status, TicketStatus::Arrived);
        assert!(snapshot.ticket(99).is_none());
        assert_eq!(snapshot.table(2).unwrap().number, 2);
        assert_eq!(snapshot.called_at_table(1).map(|t| t.id), Some(2));
        assert_eq!(snapshot.arrived_at_table(1).map(|t| t.id), Some(3));
        assert!(snapshot.called_at_table(2).is_none());
        assert_eq!(snapshot.tickets_at(2).count(), 1);
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = Snapshot::ingest(vec![], vec![Table::new(1, 1), Table::new(1, 2)]).unwrap_err();
        assert_eq!(err, SnapshotError::DuplicateTable(1));

        let err =
            Snapshot::ingest(vec![Ticket::new(5, t0()), Ticket::new(5, t0())], tables()).unwrap_err();
        assert_eq!(err, SnapshotError::DuplicateTicket(5));
    }

    #[test]
    fn test_rejects_unknown_table_reference() {
        let err = Snapshot::ingest(vec![Ticket::new(5, t0()).with_table(9)], tables()).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::UnknownTableReference {
                ticket_id: 5,
                table_id: 9
            }
        );
    }

    #[test]
    fn test_rejects_called_ticket_without_table() {
        let err = Snapshot::ingest(
            vec![Ticket::new(5, t0()).with_status(TicketStatus::ReCalled)],
            tables(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SnapshotError::MissingTableAssignment {
                ticket_id: 5,
                status: TicketStatus::ReCalled
            }
        );
    }

    #[test]
    fn test_rejects_two_active_tickets_per_table() {
        let err = Snapshot::ingest(
            vec![
                Ticket::new(1, t0()).with_status(TicketStatus::Called).with_table(2),
                Ticket::new(2, t0()).with_status(TicketStatus::ReCalled).with_table(2),
            ],
            tables(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SnapshotError::ConflictingActiveTickets {
                table_id: 2,
                first: 1,
                second: 2
            }
        );

        // one called plus one arrived is fine
        assert!(
            Snapshot::ingest(
                vec![
                    Ticket::new(1, t0()).with_status(TicketStatus::Called).with_table(2),
                    Ticket::new(2, t0()).with_status(TicketStatus::Arrived).with_table(2),
                ],
                tables(),
            )
            .is_ok()
        );
    }

    #[test]
    fn test_payload_from_json() {
        let json = r#"{
            "tickets": [{"id": 1, "status": "PENDING", "createdAt": "2025-01-17T08:00:00"}],
            "tables": [{"id": 1, "number": 3}]
        }"#;
        let payload: SnapshotPayload = serde_json::from_str(json).unwrap();
        let snapshot = Snapshot::try_from(payload).unwrap();
        assert_eq!(snapshot.tickets().len(), 1);
        assert_eq!(snapshot.table(1).map(|t| t.number), Some(3));
    }

    #[test]
    fn test_snapshot_error_into_app_error() {
        let err: AppError = SnapshotError::DuplicateTicket(3).into();
        assert_eq!(err.code, ErrorCode::SnapshotMalformed);
        assert!(err.details.unwrap().contains_key("reason"));
    }
}
