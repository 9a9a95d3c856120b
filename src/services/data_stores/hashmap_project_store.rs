use std::collections::HashMap;

use crate::domain::{
    Project, ProjectId, ProjectName, ProjectRoster, ProjectStore,
    ProjectStoreError, UserId, VersionedRoster,
};

#[derive(Default)]
pub struct HashmapProjectStore {
    projects: HashMap<ProjectId, Project>,
}

#[async_trait::async_trait]
impl ProjectStore for HashmapProjectStore {
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        if self.projects.contains_key(&project.project_id) {
            return Err(ProjectStoreError::ProjectIDExists);
        }

        self.projects.insert(project.project_id, project.clone());
        Ok(())
    }

    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        self.projects
            .get(project_id)
            .cloned()
            .ok_or(ProjectStoreError::ProjectIDNotFound)
    }

    async fn get_project_list(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(ProjectId, ProjectName)>, ProjectStoreError> {
        let mut projects: Vec<(ProjectId, ProjectName)> = self
            .projects
            .values()
            .filter(|project| project.members.contains(user_id))
            .map(|project| (project.project_id, project.project_name.clone()))
            .collect();
        projects.sort_by(|a, b| a.1.as_ref().cmp(b.1.as_ref()));
        Ok(projects)
    }

    async fn load_roster(
        &self,
        project_id: &ProjectId,
    ) -> Result<VersionedRoster, ProjectStoreError> {
        let project = self
            .projects
            .get(project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?;

        Ok(VersionedRoster {
            roster: project.members.clone(),
            version: project.version,
        })
    }

    async fn save_roster(
        &mut self,
        project_id: &ProjectId,
        roster: &ProjectRoster,
        expected_version: i64,
    ) -> Result<i64, ProjectStoreError> {
        let project = self
            .projects
            .get_mut(project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?;

        if project.version != expected_version {
            return Err(ProjectStoreError::VersionConflict {
                expected: expected_version,
                found: project.version,
            });
        }

        project.members = roster.clone();
        project.version += 1;
        Ok(project.version)
    }
}
