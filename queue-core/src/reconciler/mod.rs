//! Queue reconciler
//!
//! Pure decision functions over a [`Snapshot`]:
//! - [`partition`]: splits the tickets visible to an operator into ordered groups
//! - `can_*`: decides whether an action is legal right now
//! - [`build_command`]: re-validates against the latest snapshot and emits a [`Command`]
//!
//! Nothing here performs I/O or mutates its inputs. The operator context
//! (claimed table) is always passed in explicitly.

mod claim;
mod ineligible;

pub use claim::{can_claim, claimable_tables, resolve_claim};
pub use ineligible::{CommandError, Ineligible};

use crate::command::{Action, Command};
use crate::models::{TableId, Ticket, TicketId, TicketStatus};
use crate::snapshot::Snapshot;

/// Result of an eligibility check
pub type Eligibility = Result<(), Ineligible>;

/// Tickets visible to one operator, grouped by what can be done with them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    /// `PENDING`, in queue order
    pub pending: Vec<&'a Ticket>,
    /// `CALLED` and `RE_CALLED`, most recently called last
    pub called: Vec<&'a Ticket>,
    /// `ARRIVED`
    pub arrived: Vec<&'a Ticket>,
    /// `SERVED` and `NO_SHOW`
    pub completed: Vec<&'a Ticket>,
}

impl Partition<'_> {
    pub fn len(&self) -> usize {
        self.pending.len() + self.called.len() + self.arrived.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unassigned tickets are visible to everyone, assigned ones only at their table
pub fn is_visible(ticket: &Ticket, claimed: Option<TableId>) -> bool {
    match ticket.table_id {
        None => true,
        Some(table_id) => claimed == Some(table_id),
    }
}

/// Split the snapshot into the four ordered groups visible to `claimed`
pub fn partition(snapshot: &Snapshot, claimed: Option<TableId>) -> Partition<'_> {
    let mut out = Partition::default();

    for ticket in snapshot.tickets().iter().filter(|t| is_visible(t, claimed)) {
        match ticket.status {
            TicketStatus::Pending => out.pending.push(ticket),
            TicketStatus::Called | TicketStatus::ReCalled => out.called.push(ticket),
            TicketStatus::Arrived => out.arrived.push(ticket),
            TicketStatus::Served | TicketStatus::NoShow => out.completed.push(ticket),
        }
    }

    out.pending.sort_by_key(|t| t.queue_key());
    out.called.sort_by_key(|t| (t.last_called_at(), t.id));
    out.arrived.sort_by_key(|t| t.queue_key());
    out.completed.sort_by_key(|t| t.queue_key());

    tracing::trace!(
        claimed = ?claimed,
        pending = out.pending.len(),
        called = out.called.len(),
        arrived = out.arrived.len(),
        completed = out.completed.len(),
        "Partitioned snapshot"
    );
    out
}

// ============================================================================
// Eligibility checks
// ============================================================================

/// Checks shared by every action: open ticket, table claimed, not someone else's
fn check_ownership(ticket: &Ticket, claimed: Option<TableId>) -> Result<TableId, Ineligible> {
    if ticket.status.is_terminal() {
        return Err(Ineligible::AlreadyTerminal);
    }
    let Some(table_id) = claimed else {
        return Err(Ineligible::NoTableClaimed);
    };
    match ticket.table_id {
        Some(assigned) if assigned != table_id => Err(Ineligible::WrongTable),
        _ => Ok(table_id),
    }
}

/// `PENDING` ticket, claimed table exists and is idle
///
/// An unassigned ticket can be called to any claimed table. The table is
/// busy while any ticket there is called or arrived, the evaluated one
/// included.
pub fn can_call(ticket: &Ticket, claimed: Option<TableId>, snapshot: &Snapshot) -> Eligibility {
    let table_id = check_ownership(ticket, claimed)?;
    if snapshot.table(table_id).is_none() {
        // stale claim, the table is gone
        return Err(Ineligible::NoTableClaimed);
    }
    if snapshot.called_at_table(table_id).is_some() {
        return Err(Ineligible::TableBusyWithCalled);
    }
    if snapshot.arrived_at_table(table_id).is_some() {
        return Err(Ineligible::TableBusyWithArrived);
    }
    if ticket.status != TicketStatus::Pending {
        return Err(Ineligible::TicketNotPending);
    }
    Ok(())
}

/// Called tickets at the claimed table
fn check_called(ticket: &Ticket, claimed: Option<TableId>) -> Eligibility {
    let table_id = check_ownership(ticket, claimed)?;
    if !ticket.status.is_called() {
        return Err(Ineligible::TicketNotCalled);
    }
    if !ticket.is_at_table(table_id) {
        return Err(Ineligible::WrongTable);
    }
    Ok(())
}

pub fn can_recall(ticket: &Ticket, claimed: Option<TableId>) -> Eligibility {
    check_called(ticket, claimed)
}

pub fn can_mark_arrived(ticket: &Ticket, claimed: Option<TableId>) -> Eligibility {
    check_called(ticket, claimed)
}

pub fn can_mark_no_show(ticket: &Ticket, claimed: Option<TableId>) -> Eligibility {
    check_called(ticket, claimed)
}

pub fn can_mark_served(ticket: &Ticket, claimed: Option<TableId>) -> Eligibility {
    let table_id = check_ownership(ticket, claimed)?;
    if ticket.status != TicketStatus::Arrived {
        return Err(Ineligible::TicketNotArrived);
    }
    if !ticket.is_at_table(table_id) {
        return Err(Ineligible::WrongTable);
    }
    Ok(())
}

/// Dispatch to the check matching `action`
pub fn check(
    action: Action,
    ticket: &Ticket,
    claimed: Option<TableId>,
    snapshot: &Snapshot,
) -> Eligibility {
    match action {
        Action::Call => can_call(ticket, claimed, snapshot),
        Action::Recall => can_recall(ticket, claimed),
        Action::Arrived => can_mark_arrived(ticket, claimed),
        Action::NoShow => can_mark_no_show(ticket, claimed),
        Action::Served => can_mark_served(ticket, claimed),
    }
}

/// Every action currently legal for `ticket`, in [`Action::ALL`] order
pub fn available_actions(
    ticket: &Ticket,
    claimed: Option<TableId>,
    snapshot: &Snapshot,
) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|&action| check(action, ticket, claimed, snapshot).is_ok())
        .collect()
}

/// First pending ticket that can be called to the claimed table ("call next")
pub fn next_callable(snapshot: &Snapshot, claimed: Option<TableId>) -> Option<&Ticket> {
    partition(snapshot, claimed)
        .pending
        .into_iter()
        .find(|t| can_call(t, claimed, snapshot).is_ok())
}

// ============================================================================
// Command building
// ============================================================================

/// Build the command for `action` on `ticket_id`, re-validated against `snapshot`
///
/// Pass the most recent snapshot: an eligibility flag computed at render
/// time may be stale by the time the operator clicks.
pub fn build_command(
    snapshot: &Snapshot,
    action: Action,
    ticket_id: TicketId,
    claimed: Option<TableId>,
) -> Result<Command, CommandError> {
    let fail = |reason: Ineligible| {
        tracing::debug!(%action, ticket_id, %reason, "Command precondition failed");
        CommandError::PreconditionFailed {
            action,
            ticket_id,
            reason,
        }
    };

    let ticket = snapshot
        .ticket(ticket_id)
        .ok_or_else(|| fail(Ineligible::UnknownTicket))?;
    check(action, ticket, claimed, snapshot).map_err(fail)?;
    let Some(table_id) = claimed else {
        return Err(fail(Ineligible::NoTableClaimed));
    };

    Ok(Command {
        action,
        ticket_id,
        table_id,
    })
}
