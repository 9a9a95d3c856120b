use color_eyre::eyre::Report;
use thiserror::Error;

use super::{ProjectId, UserId};

#[derive(Debug, Error)]
pub enum AuthAPIError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Missing token")]
    MissingToken,
}

/// Rejections produced by roster operations. Every variant is a
/// validation failure: nothing has been written when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("User {0} is not a member of this project")]
    NotFound(UserId),
    #[error("User {0} is already a member of this project")]
    DuplicateMember(UserId),
    #[error("{0}")]
    RoleConflict(String),
    #[error("{0}")]
    ProductOwnerRequired(String),
    #[error("{0}")]
    ScrumRoleRequired(String),
    #[error("{0}")]
    DeveloperRequired(String),
    #[error("{0}")]
    LastMemberViolation(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("The team was changed by someone else, reload and try again")]
    Conflict,
}

impl RosterError {
    pub fn code(&self) -> &'static str {
        match self {
            RosterError::NotFound(_) => "NotFound",
            RosterError::DuplicateMember(_) => "DuplicateMember",
            RosterError::RoleConflict(_) => "RoleConflict",
            RosterError::ProductOwnerRequired(_) => "ProductOwnerRequired",
            RosterError::ScrumRoleRequired(_) => "ScrumRoleRequired",
            RosterError::DeveloperRequired(_) => "DeveloperRequired",
            RosterError::LastMemberViolation(_) => "LastMemberViolation",
            RosterError::InvalidOperation(_) => "InvalidOperation",
            RosterError::Conflict => "Conflict",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProjectAPIError {
    #[error("Authentication error")]
    AuthenticationError(#[from] AuthAPIError),
    #[error("Not allowed to change the team of project {0}")]
    Forbidden(ProjectId),
    #[error("Resource with ID not found: {0}")]
    IDNotFoundError(uuid::Uuid),
    #[error("Roster error")]
    RosterError(#[from] RosterError),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
