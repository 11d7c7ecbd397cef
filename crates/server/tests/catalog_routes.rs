use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use server::{routes::build_router, AppState};
use service::catalog::memory;
use service::customer::memory::InMemoryCustomerRepository;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

fn app() -> Router {
    let (offers, categories, tags) = memory::linked();
    let state = AppState::from_repositories(offers, categories, tags, Arc::new(InMemoryCustomerRepository::default()));
    build_router(state, CorsLayer::very_permissive())
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder.header("content-type", "application/json").body(Body::from(v.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let (status, body) = call(&app(), "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn create_offer_in_category_then_get() -> anyhow::Result<()> {
    let app = app();
    let (status, books) = call(&app, "POST", "/categories", Some(json!({"name": "Books"}))).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, offer) = call(
        &app,
        "POST",
        "/offers",
        Some(json!({"name": "Go Guide", "price": 20.0, "category": {"id": books["id"]}})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, fetched) = call(&app, "GET", &format!("/offers/{}", offer["id"]), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["price"], json!(20.0));
    assert_eq!(fetched["category"]["name"], "Books");
    assert_eq!(fetched["tags"], json!([]));
    Ok(())
}

#[tokio::test]
async fn missing_entities_are_404_with_json_body() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = call(&app, "GET", "/offers/41", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().unwrap_or_default().contains("offer 41"));

    let (status, _) = call(&app, "PUT", "/offers", Some(json!({"id": 41, "name": "x", "price": 1.0}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "PUT", "/categories", Some(json!({"id": 5, "name": "ghost"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "GET", "/tags/5", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) =
        call(&app, "POST", "/offers", Some(json!({"name": "x", "price": 1.0, "tags": [{"id": 9}]}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap_or_default().contains("tag 9"));
    Ok(())
}

#[tokio::test]
async fn update_without_id_is_bad_request() -> anyhow::Result<()> {
    let (status, body) = call(&app(), "PUT", "/offers", Some(json!({"name": "x", "price": 1.0}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_404() -> anyhow::Result<()> {
    let app = app();
    let (_, offer) = call(&app, "POST", "/offers", Some(json!({"name": "Pen", "price": 2.5}))).await?;
    let uri = format!("/offers/{}", offer["id"]);

    let (status, _) = call(&app, "DELETE", &uri, None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, "GET", &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "DELETE", &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn bulk_create_and_list() -> anyhow::Result<()> {
    let app = app();
    let (status, created) =
        call(&app, "POST", "/tags/list", Some(json!([{"name": "new"}, {"name": "sale"}]))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().map(Vec::len), Some(2));

    let (status, all) = call(&app, "GET", "/tags", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, created);

    let (status, _) = call(&app, "POST", "/categories/list", Some(json!([{"name": "A"}]))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (_, one) = call(&app, "GET", "/categories/1", None).await?;
    assert_eq!(one, json!({"id": 1, "name": "A"}));
    Ok(())
}

#[tokio::test]
async fn tag_and_category_subresources() -> anyhow::Result<()> {
    let app = app();
    let (_, music) = call(&app, "POST", "/categories", Some(json!({"name": "Music"}))).await?;
    let (_, sale) = call(&app, "POST", "/tags", Some(json!({"name": "sale"}))).await?;
    let (_, offer) = call(&app, "POST", "/offers", Some(json!({"name": "Vinyl", "price": 30.0}))).await?;
    let base = format!("/offers/{}", offer["id"]);

    let (status, tagged) = call(&app, "PUT", &format!("{base}/tags"), Some(json!({"id": sale["id"]}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tagged["tags"], json!([sale]));

    let (_, again) = call(&app, "PUT", &format!("{base}/tags"), Some(json!({"id": sale["id"]}))).await?;
    assert_eq!(again["tags"].as_array().map(Vec::len), Some(1));

    let (_, untagged) = call(&app, "DELETE", &format!("{base}/tags"), Some(json!({"id": sale["id"]}))).await?;
    assert_eq!(untagged["tags"], json!([]));

    let (status, moved) =
        call(&app, "PUT", &format!("{base}/categories"), Some(json!({"id": music["id"], "name": "ignored"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["category"], music);

    let (status, _) = call(&app, "PUT", &format!("{base}/categories"), Some(json!({"id": 777}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn filter_combines_constraints() -> anyhow::Result<()> {
    let app = app();
    let (_, books) = call(&app, "POST", "/categories", Some(json!({"name": "Books"}))).await?;
    let (_, go) = call(&app, "POST", "/tags", Some(json!({"name": "go"}))).await?;
    let cat = json!({"id": books["id"]});
    let tags = json!([{"id": go["id"]}]);

    let (_, cheap) =
        call(&app, "POST", "/offers", Some(json!({"name": "cheap", "price": 5.0, "category": cat, "tags": tags}))).await?;
    let (_, mid) =
        call(&app, "POST", "/offers", Some(json!({"name": "mid", "price": 20.0, "category": cat, "tags": tags}))).await?;
    call(&app, "POST", "/offers", Some(json!({"name": "untagged", "price": 20.0, "category": cat}))).await?;
    call(&app, "POST", "/offers", Some(json!({"name": "loose", "price": 20.0, "tags": tags}))).await?;

    let uri = format!("/offers/filter?categoryId={}&tagId={}&minPrice=10&maxPrice=20", books["id"], go["id"]);
    let (status, hits) = call(&app, "GET", &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits, json!([mid]));

    let (_, by_tag) = call(&app, "GET", &format!("/offers/filter?tagId={}&maxPrice=5", go["id"]), None).await?;
    assert_eq!(by_tag, json!([cheap]));

    let (_, everything) = call(&app, "GET", "/offers/filter", None).await?;
    assert_eq!(everything.as_array().map(Vec::len), Some(4));
    Ok(())
}

#[tokio::test]
async fn customers_crud_and_name_lookup() -> anyhow::Result<()> {
    let app = app();
    let (status, ada) =
        call(&app, "POST", "/customers", Some(json!({"first_name": "Ada", "last_name": "Lovelace"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    call(&app, "POST", "/customers", Some(json!({"first_name": "Alan", "last_name": "Turing"}))).await?;

    let (_, by_name) = call(&app, "GET", "/customers?name=Ada", None).await?;
    assert_eq!(by_name, json!([ada]));
    let (_, by_last) = call(&app, "GET", "/customers?last_name=Turing", None).await?;
    assert_eq!(by_last[0]["first_name"], "Alan");
    let (_, none) = call(&app, "GET", "/customers?name=ada", None).await?;
    assert_eq!(none, json!([]));

    let (status, renamed) = call(
        &app,
        "PUT",
        "/customers",
        Some(json!({"id": ada["id"], "first_name": "Augusta", "last_name": "Lovelace"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["first_name"], "Augusta");

    let uri = format!("/customers/{}", ada["id"]);
    let (status, _) = call(&app, "DELETE", &uri, None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, "GET", &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        call(&app, "PUT", "/customers", Some(json!({"id": 99, "first_name": "x", "last_name": "y"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_requests_get_json_errors() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = call(&app, "GET", "/offers/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");

    let (status, body) = call(&app, "GET", "/offers/filter?minPrice=cheap", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");

    let req = Request::builder()
        .method("POST")
        .uri("/offers")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].is_string());

    let (status, body) = call(&app, "POST", "/categories", Some(json!({"title": "Books"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Unprocessable Entity");
    Ok(())
}
