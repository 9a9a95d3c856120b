use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::RosterResponse;
use crate::{
    domain::{ProjectAPIError, ProjectId, Role, UserId},
    utils::auth::get_request_context,
    AppState,
};

#[tracing::instrument(name = "Add member to project route handler", skip_all)]
pub async fn add_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, CookieJar, Json<RosterResponse>), ProjectAPIError> {
    let ctx = get_request_context(&jar)?;

    let project_id = ProjectId::parse(&request.project_id)?;
    let user_id = UserId::parse(&request.user_id)?;
    let role = request.role.parse::<Role>()?;

    let updated = state
        .team_roster_manager
        .add_member(&ctx, &project_id, user_id, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        jar,
        Json(RosterResponse::new(project_id, updated)),
    ))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct AddMemberRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: String,
}
