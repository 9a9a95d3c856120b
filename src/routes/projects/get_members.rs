use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ProjectAPIError, ProjectId, ProjectMember, VersionedRoster},
    utils::auth::get_request_context,
    AppState,
};

#[derive(Deserialize)]
pub struct GetMemberListQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get member list route handler", skip_all)]
pub async fn get_member_list_for_project(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<GetMemberListQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<RosterResponse>), ProjectAPIError> {
    let ctx = get_request_context(&jar)?;
    let project_id = ProjectId::new(query_params.project_id);
    tracing::debug!("project_id: {}", project_id);

    let current = state
        .team_roster_manager
        .get_roster(&ctx, &project_id)
        .await?;

    Ok((
        StatusCode::OK,
        jar,
        Json(RosterResponse::new(project_id, current)),
    ))
}

/// Body returned by every route that reads or changes a team.
#[derive(Debug, PartialEq, Serialize)]
pub struct RosterResponse {
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    pub version: i64,
    pub members: Vec<ProjectMember>,
}

impl RosterResponse {
    pub fn new(project_id: ProjectId, current: VersionedRoster) -> Self {
        Self {
            project_id,
            version: current.version,
            members: current.roster.members().to_vec(),
        }
    }
}
