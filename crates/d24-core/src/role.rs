//! # Roles
//!
//! A user's role is assigned exactly once, through role selection, and is
//! authoritative only on the server. The client reads it to decide which
//! dashboard and which actions are reachable.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Marketplace role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Looks for drivers and books them.
    User,
    /// Offers driving services and answers booking requests.
    Driver,
    /// Views analytics and verifies drivers.
    Admin,
}

impl Role {
    /// The wire name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Driver => "DRIVER",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether a person may pick this role during role selection.
    /// Admins are provisioned server-side.
    pub fn is_self_selectable(&self) -> bool {
        matches!(self, Self::User | Self::Driver)
    }

    /// The dashboard this role lands on.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::User => "/dashboard/user",
            Self::Driver => "/dashboard/driver",
            Self::Admin => "/dashboard/admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "DRIVER" => Ok(Self::Driver),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(ValidationError::InvalidRole(s.to_string())),
        }
    }
}
