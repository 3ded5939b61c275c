//! User model and the fixed role set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Access-control role of a user account
///
/// The set is closed and ordered; `Admin` is reserved and never appears in
/// the managed user listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "staff")]
    Staff,
    #[serde(rename = "developer")]
    Developer,
    #[serde(rename = "QA")]
    Qa,
}

impl Role {
    /// Every role, in display order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Staff, Role::Developer, Role::Qa];

    /// Stable identifier, as stored and as matched by the role filter
    pub fn id(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Developer => "developer",
            Role::Qa => "QA",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Developer => "Developer",
            Role::Qa => "QA",
        }
    }

    /// Reserved roles are excluded from the managed listing
    pub fn is_reserved(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// The role set as exposed to the listing UI
    pub fn options() -> Vec<RoleOption> {
        Role::ALL.iter().map(|role| RoleOption::from(*role)).collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string is not one of the role identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.id() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Identifier/label pair for role pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOption {
    pub id: String,
    pub name: String,
}

impl From<Role> for RoleOption {
    fn from(role: Role) -> Self {
        Self {
            id: role.id().to_string(),
            name: role.label().to_string(),
        }
    }
}

/// User as exposed over the API; the password hash never leaves the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload
///
/// `role` stays a plain string so an unknown value is reported as a field
/// error rather than a malformed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "user_role")]
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_identifier() {
        for role in Role::ALL {
            assert_eq!(role.id().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_role_identifiers_are_case_sensitive() {
        assert!("qa".parse::<Role>().is_err());
        assert_eq!("QA".parse::<Role>(), Ok(Role::Qa));
        assert_eq!(
            "Staff".parse::<Role>(),
            Err(UnknownRole("Staff".to_string()))
        );
    }

    #[test]
    fn test_options_keep_order_and_labels() {
        let ids: Vec<String> = Role::options().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["admin", "staff", "developer", "QA"]);
        assert_eq!(Role::options()[1].name, "Staff");
    }

    #[test]
    fn test_only_admin_is_reserved() {
        let reserved: Vec<Role> = Role::ALL.into_iter().filter(|r| r.is_reserved()).collect();
        assert_eq!(reserved, vec![Role::Admin]);
    }

    #[test]
    fn test_serde_uses_identifiers() {
        assert_eq!(serde_json::to_string(&Role::Qa).unwrap(), "\"QA\"");
        let role: Role = serde_json::from_str("\"developer\"").unwrap();
        assert_eq!(role, Role::Developer);
    }

    #[test]
    fn test_new_user_input_accepts_user_role_alias() {
        let input: NewUserInput =
            serde_json::from_str(r#"{"name":"Ann","email":"a@x.com","user_role":"staff"}"#)
                .unwrap();
        assert_eq!(input.role, "staff");
    }
}
