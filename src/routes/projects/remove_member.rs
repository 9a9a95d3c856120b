use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::RosterResponse;
use crate::{
    domain::{ProjectAPIError, ProjectId, UserId},
    utils::auth::get_request_context,
    AppState,
};

#[derive(Deserialize)]
pub struct RemoveMemberQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
    #[serde(rename = "userId")]
    user_id: uuid::Uuid,
}

#[tracing::instrument(name = "Remove member from project route handler", skip_all)]
pub async fn remove_member(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<RemoveMemberQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<RosterResponse>), ProjectAPIError> {
    let ctx = get_request_context(&jar)?;
    let project_id = ProjectId::new(query_params.project_id);
    let user_id = UserId::new(query_params.user_id);

    let updated = state
        .team_roster_manager
        .remove_member(&ctx, &project_id, user_id)
        .await?;

    Ok((
        StatusCode::OK,
        jar,
        Json(RosterResponse::new(project_id, updated)),
    ))
}
