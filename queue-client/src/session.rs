//! Operator session
//!
//! Owns everything the reconciler deliberately does not: the operator id,
//! the remembered table claim, the latest snapshot, the tickets with an
//! action in flight and the tables with a call in flight. All decisions are delegated to `queue_core::reconciler`.

use std::collections::HashSet;
use std::sync::Arc;

use queue_core::reconciler::{self, CommandError, Ineligible, Partition};
use queue_core::{Action, Command, OperatorId, Snapshot, Table, TableId, Ticket, TicketId};
use thiserror::Error;

use crate::ClientError;
use crate::transport::CommandDispatcher;

#[derive(Debug, Error)]
pub enum SessionError {
    /// An earlier action on this ticket has not been reflected in a snapshot yet
    #[error("Ticket {ticket_id} already has an action in progress")]
    ActionInFlight { ticket_id: TicketId },

    #[error(transparent)]
    Rejected(#[from] CommandError),

    #[error("Cannot claim table: {0}")]
    Claim(#[from] Ineligible),

    #[error("No ticket can be called to this table")]
    NothingToCall,

    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] ClientError),
}

/// One operator's view of the queue
pub struct OperatorSession<D> {
    operator_id: OperatorId,
    dispatcher: D,
    snapshot: Arc<Snapshot>,
    claimed: Option<TableId>,
    in_flight: HashSet<TicketId>,
    calling: HashSet<TableId>,
}

impl<D: CommandDispatcher> OperatorSession<D> {
    pub fn new(operator_id: OperatorId, dispatcher: D) -> Self {
        Self {
            operator_id,
            dispatcher,
            snapshot: Arc::new(Snapshot::default()),
            claimed: None,
            in_flight: HashSet::new(),
            calling: HashSet::new(),
        }
    }

    pub fn operator_id(&self) -> OperatorId {
        self.operator_id
    }

    pub fn claimed_table(&self) -> Option<TableId> {
        self.claimed
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Replace the snapshot wholesale
    ///
    /// The claim is re-checked against the new tables and the in-flight sets
    /// are cleared: the snapshot now reflects whatever the backend accepted.
    pub fn ingest(&mut self, snapshot: Arc<Snapshot>) {
        self.claimed = reconciler::resolve_claim(&snapshot, self.operator_id, self.claimed);
        self.in_flight.clear();
        self.calling.clear();
        self.snapshot = snapshot;
        tracing::debug!(
            operator_id = self.operator_id,
            claimed = ?self.claimed,
            tickets = self.snapshot.tickets().len(),
            "Session ingested snapshot"
        );
    }

    // ========================================================================
    // Table claim
    // ========================================================================

    pub fn claimable_tables(&self) -> Vec<&Table> {
        reconciler::claimable_tables(&self.snapshot, self.operator_id)
    }

    pub fn claim(&mut self, table_id: TableId) -> Result<(), SessionError> {
        let table = self
            .snapshot
            .table(table_id)
            .ok_or(Ineligible::UnknownTable)?;
        reconciler::can_claim(table, self.operator_id)?;
        self.claimed = Some(table_id);
        tracing::info!(operator_id = self.operator_id, table_id, "Table claimed");
        Ok(())
    }

    /// Forget the claim; returns the table that was held
    pub fn release(&mut self) -> Option<TableId> {
        let released = self.claimed.take();
        if let Some(table_id) = released {
            tracing::info!(operator_id = self.operator_id, table_id, "Table released");
        }
        released
    }

    // ========================================================================
    // Queue view
    // ========================================================================

    pub fn partition(&self) -> Partition<'_> {
        reconciler::partition(&self.snapshot, self.claimed)
    }

    /// Legal actions for `ticket_id`; empty for an unknown ticket
    pub fn available_actions(&self, ticket_id: TicketId) -> Vec<Action> {
        self.snapshot
            .ticket(ticket_id)
            .map(|t| reconciler::available_actions(t, self.claimed, &self.snapshot))
            .unwrap_or_default()
    }

    pub fn next_callable(&self) -> Option<&Ticket> {
        reconciler::next_callable(&self.snapshot, self.claimed)
    }

    pub fn is_in_flight(&self, ticket_id: TicketId) -> bool {
        self.in_flight.contains(&ticket_id)
    }

    /// A call to this table was sent and no snapshot has reflected it yet
    pub fn is_calling(&self, table_id: TableId) -> bool {
        self.calling.contains(&table_id)
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Validate against the latest snapshot and dispatch
    pub async fn perform(
        &mut self,
        action: Action,
        ticket_id: TicketId,
    ) -> Result<Command, SessionError> {
        if self.in_flight.contains(&ticket_id) {
            tracing::warn!(%action, ticket_id, "Action rejected, ticket already in flight");
            return Err(SessionError::ActionInFlight { ticket_id });
        }

        let command = reconciler::build_command(&self.snapshot, action, ticket_id, self.claimed)
            .inspect_err(|e| tracing::warn!(error = %e, "Action rejected"))?;

        // one called ticket per table, counting calls not yet in a snapshot
        let is_call = action == Action::Call;
        if is_call && self.calling.contains(&command.table_id) {
            tracing::warn!(
                table_id = command.table_id,
                ticket_id,
                "Call rejected, table already calling"
            );
            return Err(CommandError::PreconditionFailed {
                action,
                ticket_id,
                reason: Ineligible::TableBusyWithCalled,
            }
            .into());
        }

        self.in_flight.insert(ticket_id);
        if is_call {
            self.calling.insert(command.table_id);
        }
        if let Err(e) = self.dispatcher.send(&command).await {
            self.in_flight.remove(&ticket_id);
            if is_call {
                self.calling.remove(&command.table_id);
            }
            tracing::warn!(%action, ticket_id, error = %e, "Dispatch failed");
            return Err(e.into());
        }
        Ok(command)
    }

    /// Call the first callable pending ticket to the claimed table
    pub async fn call_next(&mut self) -> Result<Command, SessionError> {
        let ticket_id = self
            .next_callable()
            .map(|t| t.id)
            .ok_or(SessionError::NothingToCall)?;
        self.perform(Action::Call, ticket_id).await
    }
}
