use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        ProjectAPIError, ProjectMember, ProjectName, Role, UserId,
        ValidationError,
    },
    utils::auth::get_request_context,
    AppState,
};

#[tracing::instrument(name = "Create new project route handler", skip_all)]
pub async fn new_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<NewProjectRequest>,
) -> Result<(StatusCode, CookieJar, Json<NewProjectResponse>), ProjectAPIError>
{
    let ctx = get_request_context(&jar)?;
    let project_name = ProjectName::parse(&request.name)?;

    let members = request
        .members
        .iter()
        .map(|member| -> Result<(UserId, Role), ValidationError> {
            Ok((UserId::parse(&member.user_id)?, member.role.parse()?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let project = state
        .team_roster_manager
        .create_project(&ctx, project_name, members)
        .await?;

    let response = Json(NewProjectResponse {
        id: project.project_id.to_string(),
        name: project.project_name.as_ref().to_owned(),
        version: project.version,
        members: project.members.members().to_vec(),
    });

    Ok((StatusCode::CREATED, jar, response))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct NewProjectResponse {
    pub id: String,
    pub name: String,
    pub version: i64,
    pub members: Vec<ProjectMember>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewProjectRequest {
    pub name: String,
    pub members: Vec<NewProjectMember>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewProjectMember {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: String,
}
