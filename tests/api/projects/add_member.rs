use crate::helpers::{
    assert_error_code, create_team, member_roles, roster_schema, TestApp,
};
use scrum_roster::domain::UserId;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_and_append_member(app: &mut TestApp) {
    let team = create_team(app).await;
    let new_developer = UserId::default();

    let response = app
        .post_add_member(&json!({
            "projectId": team.project_id,
            "userId": new_developer.to_string(),
            "role": "DEVELOPER"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value =
        response.json().await.expect("Failed to parse JSON");
    assert!(jsonschema::is_valid(&roster_schema(), &body));
    assert_eq!(body["version"], 2);

    let roles = member_roles(app, &team.project_id).await;
    assert_eq!(roles.len(), 4);
    assert_eq!(
        roles.last().unwrap(),
        &(new_developer.to_string(), "DEVELOPER".to_owned())
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_second_product_owner_and_scrum_role(app: &mut TestApp) {
    let team = create_team(app).await;

    for role in ["PRODUCT_OWNER", "SCRUM_MASTER", "SCRUM_DEV"] {
        let response = app
            .post_add_member(&json!({
                "projectId": team.project_id,
                "userId": UserId::default().to_string(),
                "role": role
            }))
            .await;
        assert_error_code(response, 409, "RoleConflict").await;
    }

    assert_eq!(member_roles(app, &team.project_id).await.len(), 3);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_duplicate_member(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .post_add_member(&json!({
            "projectId": team.project_id,
            "userId": team.developer.to_string(),
            "role": "DEVELOPER"
        }))
        .await;
    assert_error_code(response, 409, "DuplicateMember").await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_developers(app: &mut TestApp) {
    let team = create_team(app).await;
    app.login_as(&team.developer);

    let response = app
        .post_add_member(&json!({
            "projectId": team.project_id,
            "userId": UserId::default().to_string(),
            "role": "DEVELOPER"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_allow_scrum_master_to_manage_team(app: &mut TestApp) {
    let team = create_team(app).await;
    app.login_as(&team.scrum_master);

    let response = app
        .post_add_member(&json!({
            "projectId": team.project_id,
            "userId": UserId::default().to_string(),
            "role": "DEVELOPER"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_input(app: &mut TestApp) {
    let team = create_team(app).await;

    let test_cases = [
        json!({
            "projectId": "not-a-uuid",
            "userId": UserId::default().to_string(),
            "role": "DEVELOPER"
        }),
        json!({
            "projectId": team.project_id,
            "userId": UserId::default().to_string(),
            "role": "TESTER"
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_add_member(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_project(app: &mut TestApp) {
    create_team(app).await;

    let response = app
        .post_add_member(&json!({
            "projectId": uuid::Uuid::new_v4().to_string(),
            "userId": UserId::default().to_string(),
            "role": "DEVELOPER"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}
