mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{ids, TestServer};

/// A lane, an owning contact and a project: the minimum an issue needs
async fn seed(server: &TestServer) -> Result<i64> {
    server.create("/columns", json!({"name": "Backlog"})).await?;
    let owner = server
        .create(
            "/contacts",
            json!({"first_name": "Grace", "last_name": "Hopper", "text": "owner"}),
        )
        .await?;
    server
        .create("/projects", json!({"name": "Apollo", "user_id": owner}))
        .await
}

#[tokio::test]
async fn issue_defaults_to_first_column() -> Result<()> {
    let server = TestServer::spawn().await?;
    let project = seed(&server).await?;

    let res = server
        .post("/issues", json!({"title": "Fix login", "project_id": project}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let issue: Value = res.json().await?;
    assert_eq!(issue["column_id"], 1);
    assert_eq!(issue["project_id"], project);
    assert!(issue["tag_id"].is_null());
    Ok(())
}

#[tokio::test]
async fn issue_references_must_exist() -> Result<()> {
    let server = TestServer::spawn().await?;
    let project = seed(&server).await?;

    let res = server
        .post(
            "/issues",
            json!({"title": "Fix login", "project_id": project, "tag_id": 7, "milestone_id": 8}),
        )
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"milestone_id": ["Not a valid choice."], "tag_id": ["Not a valid choice."]})
    );
    Ok(())
}

#[tokio::test]
async fn project_owner_must_be_a_contact() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.post("/projects", json!({"name": "Apollo", "user_id": 3})).send().await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.json::<Value>().await?, json!({"user_id": ["Not a valid choice."]}));
    Ok(())
}

#[tokio::test]
async fn tag_color_defaults_to_white() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.post("/tags", json!({"name": "bug"})).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let tag: Value = res.json().await?;
    assert_eq!(tag["color"], "ffffff");

    let res = server.put("/tags/1", json!({"color": "ff0000"})).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["color"], "ff0000");
    Ok(())
}

#[tokio::test]
async fn milestone_defaults_are_stored() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.post("/milestones", json!({"name": "v1"})).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let milestone: Value = res.json().await?;
    assert_eq!(milestone["status"], "Active");
    assert!(milestone["due_date"].is_string());

    let res = server
        .put("/milestones/1", json!({"status": "Done", "due_date": "2024-03-01T12:00:00Z"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let fetched: Value = server.get("/milestones/1").send().await?.json().await?;
    assert_eq!(fetched["status"], "Done");
    assert!(fetched["due_date"].as_str().unwrap_or_default().starts_with("2024-03-01T12:00:00"));
    Ok(())
}

#[tokio::test]
async fn columns_embed_their_issues() -> Result<()> {
    let server = TestServer::spawn().await?;
    let project = seed(&server).await?;
    server.create("/columns", json!({"name": "Done"})).await?;

    server
        .create("/issues", json!({"title": "one", "project_id": project}))
        .await?;
    server
        .create("/issues", json!({"title": "two", "project_id": project, "column_id": 2}))
        .await?;

    let board: Value = server.get("/columns").send().await?.json().await?;
    assert_eq!(ids(&board), vec![1, 2]);
    assert_eq!(board[0]["issues"][0]["title"], "one");
    assert_eq!(board[1]["issues"][0]["title"], "two");

    let res = server.put("/issues/1", json!({"column_id": 2})).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let lane: Value = server.get("/columns/2").send().await?.json().await?;
    assert_eq!(ids(&lane["issues"]), vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn deleting_a_referenced_row() -> Result<()> {
    let server = TestServer::spawn().await?;
    let project = seed(&server).await?;
    let tag = server.create("/tags", json!({"name": "bug"})).await?;
    server
        .create("/issues", json!({"title": "one", "project_id": project, "tag_id": tag}))
        .await?;

    // Mandatory references block the delete
    let res = server.delete("/columns/1").send().await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["code"], "CONFLICT");
    let res = server.delete(&format!("/projects/{}", project)).send().await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Optional references are cleared
    let res = server.delete(&format!("/tags/{}", tag)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));
    let issue: Value = server.get("/issues/1").send().await?.json().await?;
    assert!(issue["tag_id"].is_null());
    Ok(())
}

#[tokio::test]
async fn every_board_resource_supports_crud() -> Result<()> {
    let server = TestServer::spawn().await?;

    for path in ["/efforts", "/tags", "/milestones", "/columns"] {
        let id = server.create(path, json!({"name": "first", "description": "d"})).await?;

        let res = server.get(&format!("{}/{}", path, id)).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "GET {}", path);

        let res = server
            .put(&format!("{}/{}", path, id), json!({"name": "renamed", "description": null}))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED, "PUT {}", path);
        let updated: Value = res.json().await?;
        assert_eq!(updated["name"], "renamed");
        assert!(updated["description"].is_null());

        let list: Value = server.get(path).send().await?.json().await?;
        assert_eq!(ids(&list), vec![id]);

        let res = server.delete(&format!("{}/{}", path, id)).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "DELETE {}", path);
        assert_eq!(res.json::<Value>().await?, json!([]));

        let res = server.get(&format!("{}/{}", path, id)).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "GET deleted {}", path);
    }
    Ok(())
}
