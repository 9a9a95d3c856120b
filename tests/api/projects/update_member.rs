use crate::helpers::{assert_error_code, create_team, member_roles, TestApp};
use scrum_roster::domain::UserId;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_promote_scrum_master_to_scrum_dev(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .put_member(
            &team.project_id,
            &team.scrum_master.to_string(),
            &json!({ "role": "SCRUM_DEV" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let roles = member_roles(app, &team.project_id).await;
    assert_eq!(roles[1].1, "SCRUM_DEV");

    // The scrum dev now also covers the developer quota.
    let response = app
        .delete_member(&team.project_id, &team.developer.to_string())
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_role_changes_that_break_the_team(app: &mut TestApp) {
    let team = create_team(app).await;

    let test_cases = [
        (team.owner, "DEVELOPER", 422, "ProductOwnerRequired"),
        (team.developer, "PRODUCT_OWNER", 409, "RoleConflict"),
        (team.developer, "SCRUM_MASTER", 409, "RoleConflict"),
        (team.scrum_master, "DEVELOPER", 422, "ScrumRoleRequired"),
    ];

    for (user_id, role, status, code) in test_cases {
        let response = app
            .put_member(
                &team.project_id,
                &user_id.to_string(),
                &json!({ "role": role }),
            )
            .await;
        assert_error_code(response, status, code).await;
    }

    let roles = member_roles(app, &team.project_id).await;
    assert_eq!(roles[0].1, "PRODUCT_OWNER");
    assert_eq!(roles[1].1, "SCRUM_MASTER");
    assert_eq!(roles[2].1, "DEVELOPER");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_member(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .put_member(
            &team.project_id,
            &UserId::default().to_string(),
            &json!({ "role": "DEVELOPER" }),
        )
        .await;
    assert_error_code(response, 404, "NotFound").await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_unknown_role(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app
        .put_member(
            &team.project_id,
            &team.developer.to_string(),
            &json!({ "role": "ARCHITECT" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
