use color_eyre::eyre::eyre;

use crate::{
    app_state::ProjectStoreType,
    domain::{
        MemberChangeOperation, Project, ProjectAPIError, ProjectId,
        ProjectMember, ProjectName, ProjectRoster, ProjectStoreError,
        RequestContext, Role, RosterError, UserId, ValidationError,
        VersionedRoster,
    },
};

/// Validates and commits changes to a project's team.
///
/// Every mutation is one read followed by one conditional write: the roster
/// is loaded with its version, changed in memory, checked against the team
/// rules and saved only if nobody else saved in between. The store lock is
/// never held across the whole read-modify-write.
#[derive(Clone)]
pub struct TeamRosterManager {
    project_store: ProjectStoreType,
}

impl TeamRosterManager {
    pub fn new(project_store: ProjectStoreType) -> Self {
        Self { project_store }
    }

    #[tracing::instrument(name = "Creating project", skip_all)]
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        project_name: ProjectName,
        members: Vec<(UserId, Role)>,
    ) -> Result<Project, ProjectAPIError> {
        let roster = ProjectRoster::new(
            members
                .into_iter()
                .map(|(user_id, role)| ProjectMember::new(user_id, role))
                .collect(),
        )?;

        if !roster.contains(&ctx.user_id) {
            return Err(ValidationError::new(
                "The project creator must be a member of the team".to_string(),
            )
            .into());
        }
        roster.validate()?;

        let project = Project::new(ProjectId::default(), project_name, roster);

        self.project_store
            .write()
            .await
            .add_project(&project)
            .await
            .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

        tracing::info!(
            project_id = %project.project_id,
            members = project.members.len(),
            "Project created"
        );

        Ok(project)
    }

    #[tracing::instrument(name = "Getting project list", skip_all)]
    pub async fn list_projects(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<(ProjectId, ProjectName)>, ProjectAPIError> {
        self.project_store
            .read()
            .await
            .get_project_list(&ctx.user_id)
            .await
            .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Getting project", skip_all)]
    pub async fn get_project(
        &self,
        ctx: &RequestContext,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectAPIError> {
        let project = self
            .project_store
            .read()
            .await
            .get_project(project_id)
            .await
            .map_err(|e| map_store_error(e, project_id))?;

        if ctx.role_in(&project.members).is_none() {
            return Err(ProjectAPIError::IDNotFoundError(*project_id.as_ref()));
        }

        Ok(project)
    }

    #[tracing::instrument(name = "Getting roster", skip_all)]
    pub async fn get_roster(
        &self,
        ctx: &RequestContext,
        project_id: &ProjectId,
    ) -> Result<VersionedRoster, ProjectAPIError> {
        let current = self.load_roster(project_id).await?;

        if ctx.role_in(&current.roster).is_none() {
            return Err(ProjectAPIError::IDNotFoundError(*project_id.as_ref()));
        }

        Ok(current)
    }

    #[tracing::instrument(name = "Adding member to team", skip_all)]
    pub async fn add_member(
        &self,
        ctx: &RequestContext,
        project_id: &ProjectId,
        user_id: UserId,
        role: Role,
    ) -> Result<VersionedRoster, ProjectAPIError> {
        self.commit_change(ctx, project_id, |roster| {
            roster.add_member(user_id, role)
        })
        .await
    }

    #[tracing::instrument(name = "Removing member from team", skip_all)]
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        project_id: &ProjectId,
        user_id: UserId,
    ) -> Result<VersionedRoster, ProjectAPIError> {
        self.commit_change(ctx, project_id, |roster| {
            roster.remove_member(&user_id)
        })
        .await
    }

    #[tracing::instrument(name = "Updating member role", skip_all)]
    pub async fn update_member_role(
        &self,
        ctx: &RequestContext,
        project_id: &ProjectId,
        user_id: UserId,
        role: Role,
    ) -> Result<VersionedRoster, ProjectAPIError> {
        self.commit_change(ctx, project_id, |roster| {
            roster.update_member_role(&user_id, role)
        })
        .await
    }

    #[tracing::instrument(name = "Applying bulk team update", skip_all)]
    pub async fn apply_bulk(
        &self,
        ctx: &RequestContext,
        project_id: &ProjectId,
        operations: &[MemberChangeOperation],
    ) -> Result<VersionedRoster, ProjectAPIError> {
        tracing::debug!(operations = operations.len(), "Applying batch");
        self.commit_change(ctx, project_id, |roster| {
            roster.apply_bulk(operations)
        })
        .await
    }

    async fn load_roster(
        &self,
        project_id: &ProjectId,
    ) -> Result<VersionedRoster, ProjectAPIError> {
        self.project_store
            .read()
            .await
            .load_roster(project_id)
            .await
            .map_err(|e| map_store_error(e, project_id))
    }

    async fn commit_change<F>(
        &self,
        ctx: &RequestContext,
        project_id: &ProjectId,
        change: F,
    ) -> Result<VersionedRoster, ProjectAPIError>
    where
        F: FnOnce(&ProjectRoster) -> Result<ProjectRoster, RosterError>,
    {
        let current = self.load_roster(project_id).await?;
        authorize_team_change(ctx, project_id, &current.roster)?;

        let next = change(&current.roster)?;
        // Single operations check their own preconditions; the full rule set
        // still has to hold before anything is written.
        next.validate()?;

        let version = self
            .project_store
            .write()
            .await
            .save_roster(project_id, &next, current.version)
            .await
            .map_err(|e| map_store_error(e, project_id))?;

        tracing::info!(
            project_id = %project_id,
            version,
            members = next.len(),
            "Team updated"
        );

        Ok(VersionedRoster {
            roster: next,
            version,
        })
    }
}

#[tracing::instrument(name = "Check user permissions for team change", skip_all)]
fn authorize_team_change(
    ctx: &RequestContext,
    project_id: &ProjectId,
    roster: &ProjectRoster,
) -> Result<(), ProjectAPIError> {
    match ctx.role_in(roster) {
        None => Err(ProjectAPIError::IDNotFoundError(*project_id.as_ref())),
        Some(role) if !role.can_manage_team() => {
            Err(ProjectAPIError::Forbidden(*project_id))
        }
        Some(_) => Ok(()),
    }
}

fn map_store_error(
    e: ProjectStoreError,
    project_id: &ProjectId,
) -> ProjectAPIError {
    match e {
        ProjectStoreError::ProjectIDNotFound => {
            ProjectAPIError::IDNotFoundError(*project_id.as_ref())
        }
        ProjectStoreError::VersionConflict { expected, found } => {
            tracing::warn!(
                project_id = %project_id,
                expected,
                found,
                "Concurrent team change detected"
            );
            ProjectAPIError::RosterError(RosterError::Conflict)
        }
        e => ProjectAPIError::UnexpectedError(eyre!(e)),
    }
}
