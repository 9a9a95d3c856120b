use crate::helpers::{create_team, TestApp};
use scrum_roster::domain::UserId;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_project_for_members(app: &mut TestApp) {
    let team = create_team(app).await;
    app.login_as(&team.developer);

    let response = app.get_project(&team.project_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value =
        response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["projectId"], team.project_id);
    assert_eq!(body["projectName"], "Ferris Wheel");
    assert_eq!(body["version"], 1);
    assert_eq!(body["members"].as_array().unwrap().len(), 3);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_non_members_and_unknown_projects(
    app: &mut TestApp,
) {
    let team = create_team(app).await;

    let response = app.get_project(&uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(response.status().as_u16(), 404);

    app.login_as(&UserId::default());
    let response = app.get_project(&team.project_id).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_malformed_project_id(app: &mut TestApp) {
    create_team(app).await;

    let response = app.get_project("not-a-uuid").await;
    assert_eq!(response.status().as_u16(), 400);
}
