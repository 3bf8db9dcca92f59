mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::empty_app();
    let (status, body) = common::get(&app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    Ok(())
}

#[tokio::test]
async fn create_and_fetch_a_union() -> Result<()> {
    let app = common::empty_app();

    let (status, body) =
        common::post(&app, "/api/unions", json!({ "id": "u1", "name": "Pacific" })).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["type"], "union");
    assert_eq!(body["data"]["id"], "u1");

    let (status, body) = common::get(&app, "/api/unions/u1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Pacific");
    assert_eq!(body["data"]["is_active"], true);
    Ok(())
}

#[tokio::test]
async fn conference_creation_accumulates_all_validation_errors() -> Result<()> {
    let app = common::empty_app();

    // Missing name and missing union_id reported together
    let (status, body) = common::post(&app, "/api/conferences", json!({ "name": "" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn church_union_must_match_its_conference() -> Result<()> {
    let app = common::seeded_app();

    let (status, body) = common::post(
        &app,
        "/api/churches",
        json!({ "name": "Bethel", "conference_id": "c1", "union_id": "u9" }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));

    // Leaving union_id out backfills it from the parent conference
    let (status, body) = common::post(
        &app,
        "/api/churches",
        json!({ "name": "Bethel", "conference_id": "c1" }),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["union_id"], "u1");
    Ok(())
}

#[tokio::test]
async fn duplicate_id_conflicts() -> Result<()> {
    let app = common::seeded_app();
    let (status, body) =
        common::post(&app, "/api/unions", json!({ "id": "u1", "name": "Atlantic" })).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn patch_renames_and_delete_deactivates() -> Result<()> {
    let app = common::seeded_app();

    let (status, body) =
        common::patch(&app, "/api/conferences/c1", json!({ "name": "Far North" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Far North");

    let (status, body) = common::delete(&app, "/api/churches/h1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);
    assert_eq!(body["message"], "Entity deactivated");

    // Gone from the default listing, visible with include_inactive
    let (_, body) = common::get(&app, "/api/churches").await?;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Hope"]);

    let (_, body) = common::get(&app, "/api/churches?include_inactive=true").await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn unknown_collections_and_cross_collection_ids_are_not_found() -> Result<()> {
    let app = common::seeded_app();

    let (status, _) = common::get(&app, "/api/teams").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // h1 exists but is a church, not a union
    let (status, body) = common::get(&app, "/api/unions/h1").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}
