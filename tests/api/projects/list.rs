use crate::helpers::{create_team, TestApp};
use scrum_roster::domain::UserId;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_only_projects_the_caller_belongs_to(app: &mut TestApp) {
    let team = create_team(app).await;

    let response = app.get_projects_list().await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value =
        response.json().await.expect("Failed to parse JSON");
    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "projects": {
          "type": "array",
          "items": {
            "type": "object",
            "properties": {
              "id": { "type": "string" },
              "name": { "type": "string" }
            },
            "required": ["id", "name"]
          }
        }
      },
      "required": ["projects"]
    });
    assert!(jsonschema::is_valid(&schema, &body));

    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], team.project_id);
    assert_eq!(projects[0]["name"], "Ferris Wheel");

    app.login_as(&team.developer);
    let body: serde_json::Value =
        app.get_projects_list().await.json().await.unwrap();
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);

    app.login_as(&UserId::default());
    let body: serde_json::Value =
        app.get_projects_list().await.json().await.unwrap();
    assert!(body["projects"].as_array().unwrap().is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_with_invalid_token(app: &mut TestApp) {
    let url = reqwest::Url::parse(&app.address).unwrap();
    app.cookie_jar
        .add_cookie_str("jwt=invalid; Path=/", &url);

    let response = app.get_projects_list().await;
    assert_eq!(response.status().as_u16(), 401);
}
