//! Backend JSON shapes
//!
//! The backend nests related records (`table`, `timeSlot`, `role`) instead of
//! sending flat ids. These DTOs mirror that shape and convert into the
//! `queue-core` models.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use queue_core::{
    AppError, Employee, EmployeeId, EmployeeRole, ErrorCode, OperatorId, Table, TableId,
    TableStatus, Ticket, TicketId, TicketStatus,
};

// ============================================================================
// Queue
// ============================================================================

/// Table as embedded in a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRefDto {
    pub id: TableId,
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default)]
    pub status: Option<TableStatus>,
}

/// Booked slot of a pre-registered ticket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDto {
    #[serde(default)]
    pub slot_date: Option<NaiveDate>,
    #[serde(default)]
    pub slot_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: TicketId,
    pub status: TicketStatus,
    #[serde(default)]
    pub table: Option<TableRefDto>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub called_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub re_called_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub time_slot: Option<TimeSlotDto>,
}

impl From<TicketDto> for Ticket {
    fn from(dto: TicketDto) -> Self {
        let slot = dto.time_slot.unwrap_or_default();
        Ticket {
            id: dto.id,
            status: dto.status,
            table_id: dto.table.map(|t| t.id),
            created_at: dto.created_at,
            called_at: dto.called_at,
            re_called_at: dto.re_called_at,
            slot_date: slot.slot_date,
            slot_time: slot.slot_time,
        }
    }
}

/// Employee holding a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRefDto {
    pub id: OperatorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDto {
    pub id: TableId,
    pub number: i32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub employee: Option<EmployeeRefDto>,
}

impl From<TableDto> for Table {
    fn from(dto: TableDto) -> Self {
        // a claim implies OCCUPIED even if the backend lags on the flag
        let status = if dto.employee.is_some() {
            TableStatus::Occupied
        } else {
            dto.status
        };
        Table {
            id: dto.id,
            number: dto.number,
            status,
            assigned_operator_id: dto.employee.map(|e| e.id),
        }
    }
}

// ============================================================================
// Employees
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDto {
    #[serde(default)]
    pub id: Option<u8>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: EmployeeId,
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: RoleDto,
    #[serde(default)]
    pub is_online: Option<bool>,
}

impl TryFrom<EmployeeDto> for Employee {
    type Error = AppError;

    fn try_from(dto: EmployeeDto) -> Result<Self, Self::Error> {
        let role = match EmployeeRole::from_name(&dto.role.name) {
            Some(role) => role,
            None => match dto.role.id {
                Some(id) => EmployeeRole::try_from(id)?,
                None => {
                    return Err(AppError::new(ErrorCode::RoleNotFound)
                        .with_detail("role", dto.role.name));
                }
            },
        };
        Ok(Employee {
            id: dto.id,
            last_name: dto.last_name,
            first_name: dto.first_name,
            middle_name: dto.middle_name.filter(|m| !m.is_empty()),
            email: dto.email,
            phone: dto.phone.unwrap_or_default(),
            role,
            is_online: dto.is_online.unwrap_or(false),
        })
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error body returned by the backend, e.g. `{"message": "..."}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}
