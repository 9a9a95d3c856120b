use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::RosterResponse;
use crate::{
    domain::{ProjectAPIError, ProjectId, Role, UserId},
    utils::auth::get_request_context,
    AppState,
};

#[derive(Deserialize)]
pub struct UpdateMemberQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
    #[serde(rename = "userId")]
    user_id: uuid::Uuid,
}

#[tracing::instrument(name = "Update member role route handler", skip_all)]
pub async fn update_member(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<UpdateMemberQueryParams>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<(StatusCode, CookieJar, Json<RosterResponse>), ProjectAPIError> {
    let ctx = get_request_context(&jar)?;
    let project_id = ProjectId::new(query_params.project_id);
    let user_id = UserId::new(query_params.user_id);
    let role = request.role.parse::<Role>()?;

    let updated = state
        .team_roster_manager
        .update_member_role(&ctx, &project_id, user_id, role)
        .await?;

    Ok((
        StatusCode::OK,
        jar,
        Json(RosterResponse::new(project_id, updated)),
    ))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateMemberRequest {
    pub role: String,
}
