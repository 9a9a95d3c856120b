use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::ProjectAPIError, utils::auth::get_request_context, AppState,
};

#[tracing::instrument(name = "Get project list route handler", skip_all)]
pub async fn get_project_list(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<ProjectListResponse>), ProjectAPIError>
{
    let ctx = get_request_context(&jar)?;

    let project_list = state.team_roster_manager.list_projects(&ctx).await?;
    tracing::debug!("user {} is on {} projects", ctx.user_id, project_list.len());

    let response = Json(ProjectListResponse {
        projects: project_list
            .into_iter()
            .map(|(project_id, project_name)| ProjectSummary {
                id: project_id.to_string(),
                name: project_name.as_ref().to_owned(),
            })
            .collect(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
}
