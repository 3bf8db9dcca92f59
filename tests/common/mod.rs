use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use church_admin_api::handlers::app;
use church_admin_api::hierarchy::{EntityDraft, EntityKind};
use church_admin_api::store::Registry;

pub fn empty_app() -> Router {
    app(Registry::new())
}

/// A small, known organization:
///
///   Pacific (u1)
///     North (c1) -> Grace (h1)
///     South (c2) -> Hope (h2)
pub fn seeded_app() -> Router {
    let registry = Registry::new();

    let draft = |id: &str, name: &str| EntityDraft {
        id: Some(id.to_string()),
        name: name.to_string(),
        ..Default::default()
    };

    registry
        .create(EntityKind::Union, draft("u1", "Pacific"))
        .expect("seed union");
    for (id, name) in [("c1", "North"), ("c2", "South")] {
        registry
            .create(
                EntityKind::Conference,
                EntityDraft {
                    union_id: Some("u1".to_string()),
                    ..draft(id, name)
                },
            )
            .expect("seed conference");
    }
    for (id, name, conference) in [("h1", "Grace", "c1"), ("h2", "Hope", "c2")] {
        registry
            .create(
                EntityKind::Church,
                EntityDraft {
                    conference_id: Some(conference.to_string()),
                    ..draft(id, name)
                },
            )
            .expect("seed church");
    }

    app(registry)
}

/// Drive the router in-process and decode the JSON body.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    request(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    request(app, Method::POST, uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    request(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    request(app, Method::DELETE, uri, None).await
}
