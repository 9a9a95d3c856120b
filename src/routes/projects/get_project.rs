use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    domain::{Project, ProjectAPIError, ProjectId},
    utils::auth::get_request_context,
    AppState,
};

#[derive(Deserialize)]
pub struct GetProjectQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get project route handler", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<GetProjectQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<Project>), ProjectAPIError> {
    let ctx = get_request_context(&jar)?;
    let project_id = ProjectId::new(query_params.project_id);

    let project = state
        .team_roster_manager
        .get_project(&ctx, &project_id)
        .await?;

    Ok((StatusCode::OK, jar, Json(project)))
}
