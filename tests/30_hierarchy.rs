mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::Value;

fn node_count(nodes: &Value) -> usize {
    nodes
        .as_array()
        .map(|arr| arr.iter().map(|n| 1 + node_count(&n["children"])).sum())
        .unwrap_or(0)
}

#[tokio::test]
async fn tree_contains_every_active_entity_once() -> Result<()> {
    let app = common::seeded_app();

    let (status, body) = common::get(&app, "/api/hierarchy/tree").await?;
    assert_eq!(status, StatusCode::OK);

    let forest = &body["data"];
    assert_eq!(forest.as_array().map(Vec::len), Some(1));
    assert_eq!(node_count(forest), 5);

    let root = &forest[0];
    assert_eq!(root["entity"]["id"], "u1");
    assert_eq!(root["level"], 0);

    let conference_names: Vec<&str> = root["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["entity"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(conference_names, vec!["North", "South"]);
    Ok(())
}

#[tokio::test]
async fn deactivated_entities_drop_out_of_the_tree() -> Result<()> {
    let app = common::seeded_app();
    common::delete(&app, "/api/churches/h2").await?;

    let (_, body) = common::get(&app, "/api/hierarchy/tree").await?;
    assert_eq!(node_count(&body["data"]), 4);
    Ok(())
}

#[tokio::test]
async fn path_is_root_to_self() -> Result<()> {
    let app = common::seeded_app();

    let (status, body) = common::get(&app, "/api/hierarchy/h1/path").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!(["u1", "c1", "h1"]));

    let (_, body) = common::get(&app, "/api/hierarchy/u1/path").await?;
    assert_eq!(body["data"], serde_json::json!(["u1"]));
    Ok(())
}

#[tokio::test]
async fn ancestors_resolve_root_first() -> Result<()> {
    let app = common::seeded_app();

    let (status, body) = common::get(&app, "/api/hierarchy/h1/ancestors").await?;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["u1", "c1"]);

    let (_, body) = common::get(&app, "/api/hierarchy/u1/ancestors").await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn descendants_cover_the_subtree() -> Result<()> {
    let app = common::seeded_app();

    let (_, body) = common::get(&app, "/api/hierarchy/u1/descendants").await?;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    // Conferences first (by name), then their churches (by name)
    assert_eq!(ids, vec!["c1", "c2", "h1", "h2"]);

    let (_, body) = common::get(&app, "/api/hierarchy/c1/descendants").await?;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["h1"]);

    let (_, body) = common::get(&app, "/api/hierarchy/h1/descendants").await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn accessible_is_the_entity_plus_its_subtree() -> Result<()> {
    let app = common::seeded_app();

    let (_, body) = common::get(&app, "/api/hierarchy/c1/accessible").await?;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    // Candidates are name-sorted: Grace (h1) before North (c1)
    assert_eq!(ids, vec!["h1", "c1"]);

    let (_, body) = common::get(&app, "/api/hierarchy/h1/accessible").await?;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["h1"]);

    let (_, body) = common::get(&app, "/api/hierarchy/u1/accessible").await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn unknown_entity_id_is_not_found() -> Result<()> {
    let app = common::seeded_app();
    for uri in [
        "/api/hierarchy/zz/path",
        "/api/hierarchy/zz/ancestors",
        "/api/hierarchy/zz/descendants",
        "/api/hierarchy/zz/accessible",
    ] {
        let (status, body) = common::get(&app, uri).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
        assert_eq!(body["success"], false);
    }
    Ok(())
}
