//! Employee Model

use serde::{Deserialize, Serialize};

use super::EmployeeId;
use crate::error::{AppError, AppResult, ErrorCode};

/// Bootstrap administrator, never deletable
pub const PRIMARY_ADMIN_ID: EmployeeId = 1;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Employee role, serialized as its numeric id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum EmployeeRole {
    #[default]
    Employee = 1,
    Admin = 2,
}

impl EmployeeRole {
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Role name as stored by the backend
    pub fn name(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Admin => "ADMIN",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "EMPLOYEE" => Some(Self::Employee),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl From<EmployeeRole> for u8 {
    fn from(role: EmployeeRole) -> Self {
        role.id()
    }
}

impl TryFrom<u8> for EmployeeRole {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Employee),
            2 => Ok(Self::Admin),
            other => Err(AppError::new(ErrorCode::RoleNotFound).with_detail("role", other)),
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Employee record (without password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: EmployeeRole,
    #[serde(default)]
    pub is_online: bool,
}

impl Employee {
    /// "Last First Middle", without trailing blanks when there is no middle name
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.last_name,
            self.first_name,
            self.middle_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Badge shown in the admin list, e.g. "Admin #1"
    pub fn badge(&self) -> String {
        let title = match self.role {
            EmployeeRole::Admin => "Admin",
            EmployeeRole::Employee => "Employee",
        };
        format!("{} #{}", title, self.id)
    }
}

/// Registration payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub role: EmployeeRole,
}

impl EmployeeCreate {
    /// Client-side checks run before the registration request is sent
    pub fn validate(&self) -> AppResult<()> {
        if self.last_name.trim().is_empty() || self.first_name.trim().is_empty() {
            return Err(AppError::new(ErrorCode::EmployeeNameRequired));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::field(ErrorCode::EmployeeInvalidEmail, "email"));
        }
        if self.phone.trim().is_empty() {
            return Err(AppError::field(ErrorCode::EmployeePhoneRequired, "phone"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::new(ErrorCode::PasswordTooShort)
                .with_detail("min_length", MIN_PASSWORD_LEN));
        }
        Ok(())
    }
}

/// Refuse to delete the bootstrap administrator
pub fn ensure_deletable(employee_id: EmployeeId) -> AppResult<()> {
    if employee_id == PRIMARY_ADMIN_ID {
        return Err(AppError::new(ErrorCode::CannotDeleteAdmin).with_detail("id", employee_id));
    }
    Ok(())
}

/// `local@domain.tld`, no whitespace anywhere
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
