use serde::Serialize;

use super::{ProjectId, ProjectName, ProjectRoster};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    #[serde(rename = "projectName")]
    pub project_name: ProjectName,
    pub members: ProjectRoster,
    pub version: i64,
}

impl Project {
    pub fn new(
        project_id: ProjectId,
        project_name: ProjectName,
        members: ProjectRoster,
    ) -> Self {
        Self {
            project_id,
            project_name,
            members,
            version: 1,
        }
    }
}
