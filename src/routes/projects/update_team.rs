use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::RosterResponse;
use crate::{
    domain::{
        MemberChangeOperation, OperationKind, ProjectAPIError, ProjectId, Role,
        UserId, ValidationError,
    },
    utils::auth::get_request_context,
    AppState,
};

#[tracing::instrument(name = "Bulk team update route handler", skip_all)]
pub async fn update_team(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<UpdateTeamRequest>,
) -> Result<(StatusCode, CookieJar, Json<RosterResponse>), ProjectAPIError> {
    let ctx = get_request_context(&jar)?;
    let project_id = ProjectId::parse(&request.project_id)?;

    let operations = request
        .operations
        .iter()
        .map(TeamOperation::parse)
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let updated = state
        .team_roster_manager
        .apply_bulk(&ctx, &project_id, &operations)
        .await?;

    Ok((
        StatusCode::OK,
        jar,
        Json(RosterResponse::new(project_id, updated)),
    ))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub operations: Vec<TeamOperation>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct TeamOperation {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub operation: OperationKind,
    #[serde(default)]
    pub role: Option<String>,
}

impl TeamOperation {
    // A missing role is left for the roster to reject in batch order.
    fn parse(&self) -> Result<MemberChangeOperation, ValidationError> {
        Ok(MemberChangeOperation {
            user_id: UserId::parse(&self.user_id)?,
            operation: self.operation,
            role: self.role.as_deref().map(str::parse::<Role>).transpose()?,
        })
    }
}
