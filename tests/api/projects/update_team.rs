use crate::helpers::{
    assert_error_code, create_team, member_roles, roster_schema, TestApp,
};
use scrum_roster::domain::{ProjectId, ProjectStore, UserId};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_swap_product_owner_in_one_request(app: &mut TestApp) {
    let team = create_team(app).await;
    let new_owner = UserId::default();

    let response = app
        .post_update_team(&json!({
            "projectId": team.project_id,
            "operations": [
                {"userId": team.owner.to_string(), "operation": "remove"},
                {"userId": new_owner.to_string(), "operation": "add", "role": "PRODUCT_OWNER"},
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(jsonschema::is_valid(&roster_schema(), &body));
    assert_eq!(body["version"], 2);

    // The old owner is no longer on the team and cannot read it.
    let response = app.get_members(&team.project_id).await;
    assert_eq!(response.status().as_u16(), 404);

    app.login_as(&new_owner);
    let roles = member_roles(app, &team.project_id).await;
    assert_eq!(
        roles,
        vec![
            (team.scrum_master.to_string(), "SCRUM_MASTER".to_owned()),
            (team.developer.to_string(), "DEVELOPER".to_owned()),
            (new_owner.to_string(), "PRODUCT_OWNER".to_owned()),
        ]
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_swap_scrum_master_and_developer_roles(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .post_update_team(&json!({
            "projectId": team.project_id,
            "operations": [
                {"userId": team.scrum_master.to_string(), "operation": "update", "role": "DEVELOPER"},
                {"userId": team.developer.to_string(), "operation": "update", "role": "SCRUM_MASTER"},
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let roles = member_roles(app, &team.project_id).await;
    assert_eq!(roles[1].1, "DEVELOPER");
    assert_eq!(roles[2].1, "SCRUM_MASTER");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_leave_team_untouched_when_batch_is_rejected(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .post_update_team(&json!({
            "projectId": team.project_id,
            "operations": [
                {"userId": UserId::default().to_string(), "operation": "add", "role": "DEVELOPER"},
                {"userId": team.owner.to_string(), "operation": "remove"},
            ]
        }))
        .await;
    assert_error_code(response, 422, "ProductOwnerRequired").await;

    let response = app
        .post_update_team(&json!({
            "projectId": team.project_id,
            "operations": [
                {"userId": UserId::default().to_string(), "operation": "add", "role": "SCRUM_DEV"},
            ]
        }))
        .await;
    assert_error_code(response, 409, "RoleConflict").await;

    let project_id = ProjectId::parse(&team.project_id).unwrap();
    let stored = app
        .project_store
        .read()
        .await
        .load_roster(&project_id)
        .await
        .unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.roster.len(), 3);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_operations_without_a_role(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .post_update_team(&json!({
            "projectId": team.project_id,
            "operations": [
                {"userId": UserId::default().to_string(), "operation": "add"},
            ]
        }))
        .await;
    assert_error_code(response, 422, "InvalidOperation").await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_removing_everyone(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .post_update_team(&json!({
            "projectId": team.project_id,
            "operations": [
                {"userId": team.owner.to_string(), "operation": "remove"},
                {"userId": team.scrum_master.to_string(), "operation": "remove"},
                {"userId": team.developer.to_string(), "operation": "remove"},
            ]
        }))
        .await;
    assert_error_code(response, 422, "LastMemberViolation").await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_for_unknown_operation(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .post_update_team(&json!({
            "projectId": team.project_id,
            "operations": [
                {"userId": team.developer.to_string(), "operation": "promote"},
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 422);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_developers(app: &mut TestApp) {
    let team = create_team(app).await;
    app.login_as(&team.developer);

    let response = app
        .post_update_team(&json!({
            "projectId": team.project_id,
            "operations": [
                {"userId": UserId::default().to_string(), "operation": "add", "role": "DEVELOPER"},
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}
