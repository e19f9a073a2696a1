//! Table claiming
//!
//! The claimed table is UI memory owned by the caller; these helpers only
//! decide which claims are possible and whether a remembered claim still
//! holds against a fresh snapshot.

use super::{Eligibility, Ineligible};
use crate::models::{OperatorId, Table, TableId};
use crate::snapshot::Snapshot;

/// A table can be claimed when it is free or already ours
pub fn can_claim(table: &Table, operator_id: OperatorId) -> Eligibility {
    if table.is_available_to(operator_id) {
        Ok(())
    } else {
        Err(Ineligible::TableOccupied)
    }
}

/// Tables the operator may pick from, by table number
pub fn claimable_tables(snapshot: &Snapshot, operator_id: OperatorId) -> Vec<&Table> {
    let mut tables: Vec<&Table> = snapshot
        .tables()
        .iter()
        .filter(|t| t.is_available_to(operator_id))
        .collect();
    tables.sort_by_key(|t| (t.number, t.id));
    tables
}

/// Re-check a remembered claim against a new snapshot
///
/// Returns `None` when the table disappeared or another operator now holds it.
pub fn resolve_claim(
    snapshot: &Snapshot,
    operator_id: OperatorId,
    remembered: Option<TableId>,
) -> Option<TableId> {
    let table_id = remembered?;
    match snapshot.table(table_id) {
        Some(table) if table.is_available_to(operator_id) => Some(table_id),
        Some(table) => {
            tracing::info!(
                table_id,
                holder = ?table.assigned_operator_id,
                "Claimed table taken by another operator, dropping claim"
            );
            None
        }
        None => {
            tracing::info!(table_id, "Claimed table no longer exists, dropping claim");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::ingest(
            vec![],
            vec![
                Table::new(10, 3),
                Table::new(11, 1).claimed_by(8),
                Table::new(12, 2).claimed_by(7),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_can_claim() {
        let snap = snapshot();
        assert_eq!(can_claim(snap.table(10).unwrap(), 7), Ok(()));
        assert_eq!(can_claim(snap.table(12).unwrap(), 7), Ok(()));
        assert_eq!(
            can_claim(snap.table(11).unwrap(), 7),
            Err(Ineligible::TableOccupied)
        );
    }

    #[test]
    fn test_claimable_tables_sorted_by_number() {
        let snap = snapshot();
        let numbers: Vec<i32> = claimable_tables(&snap, 7).iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn test_resolve_claim() {
        let snap = snapshot();
        assert_eq!(resolve_claim(&snap, 7, Some(12)), Some(12));
        assert_eq!(resolve_claim(&snap, 7, Some(10)), Some(10));
        assert_eq!(resolve_claim(&snap, 7, Some(11)), None);
        assert_eq!(resolve_claim(&snap, 7, Some(99)), None);
        assert_eq!(resolve_claim(&snap, 7, None), None);
    }
}
