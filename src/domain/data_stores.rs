use super::{Project, ProjectId, ProjectName, ProjectRoster, UserId};
use color_eyre::eyre::Report;
use thiserror::Error;

/// A roster together with the project version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedRoster {
    pub roster: ProjectRoster,
    pub version: i64,
}

#[async_trait::async_trait]
pub trait ProjectStore {
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError>;
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError>;
    async fn get_project_list(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(ProjectId, ProjectName)>, ProjectStoreError>;
    async fn load_roster(
        &self,
        project_id: &ProjectId,
    ) -> Result<VersionedRoster, ProjectStoreError>;
    /// Replaces the whole roster only if the stored version still equals
    /// `expected_version`. Returns the new version.
    async fn save_roster(
        &mut self,
        project_id: &ProjectId,
        roster: &ProjectRoster,
        expected_version: i64,
    ) -> Result<i64, ProjectStoreError>;
}

#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project ID exists")]
    ProjectIDExists,
    #[error("Project ID not found")]
    ProjectIDNotFound,
    #[error("Project version conflict: expected {expected}, found {found}")]
    VersionConflict { expected: i64, found: i64 },
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectIDExists, Self::ProjectIDExists)
                | (Self::ProjectIDNotFound, Self::ProjectIDNotFound)
                | (Self::VersionConflict { .. }, Self::VersionConflict { .. })
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
