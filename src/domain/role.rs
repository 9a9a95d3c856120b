use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Team role held by a project member.
///
/// `ScrumDev` is a hybrid role: it fills the single Scrum Master seat and
/// also counts towards the Developer quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    ProductOwner,
    ScrumMaster,
    Developer,
    ScrumDev,
}

impl Role {
    pub fn counts_as_scrum_role(&self) -> bool {
        matches!(self, Role::ScrumMaster | Role::ScrumDev)
    }

    pub fn counts_as_developer_role(&self) -> bool {
        matches!(self, Role::Developer | Role::ScrumDev)
    }

    /// Roles allowed to change the composition of a team.
    pub fn can_manage_team(&self) -> bool {
        matches!(
            self,
            Role::ProductOwner | Role::ScrumMaster | Role::ScrumDev
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ProductOwner => "PRODUCT_OWNER",
            Role::ScrumMaster => "SCRUM_MASTER",
            Role::Developer => "DEVELOPER",
            Role::ScrumDev => "SCRUM_DEV",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRODUCT_OWNER" => Ok(Role::ProductOwner),
            "SCRUM_MASTER" => Ok(Role::ScrumMaster),
            "DEVELOPER" => Ok(Role::Developer),
            "SCRUM_DEV" => Ok(Role::ScrumDev),
            _ => Err(ValidationError::new(format!("Invalid role: {s}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
