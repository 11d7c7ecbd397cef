use std::net::SocketAddr;

use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, AppState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests. Provide .env.test or env var.");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }

    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await { eprintln!("migrations notice: {}", e); }

    let app = routes::build_router(AppState::from_db(db), CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn started() -> Option<TestApp> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return None; }
    match start_server().await {
        Ok(a) => Some(a),
        Err(e) => { eprintln!("skip e2e: {}", e); None }
    }
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let Some(app) = started().await else { return Ok(()) };
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_offer_lifecycle() -> anyhow::Result<()> {
    let Some(app) = started().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let url = |path: &str| format!("{}{}", app.base_url, path);
    // unique names keep reruns against the same database apart
    let suffix = Uuid::new_v4().simple().to_string();

    let books: Value = client
        .post(url("/categories"))
        .json(&json!({"name": format!("Books-{suffix}")}))
        .send()
        .await?
        .json()
        .await?;
    let tag: Value = client
        .post(url("/tags"))
        .json(&json!({"name": format!("go-{suffix}")}))
        .send()
        .await?
        .json()
        .await?;

    let res = client
        .post(url("/offers"))
        .json(&json!({"name": "Go Guide", "price": 20.0, "category": {"id": books["id"]}, "tags": [{"id": tag["id"]}]}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let offer: Value = res.json().await?;
    let offer_url = url(&format!("/offers/{}", offer["id"]));

    let fetched: Value = client.get(&offer_url).send().await?.json().await?;
    assert_eq!(fetched["price"], json!(20.0));
    assert_eq!(fetched["category"]["name"], books["name"]);
    assert_eq!(fetched["tags"], json!([tag]));

    let hits: Value = client
        .get(url(&format!("/offers/filter?categoryId={}&tagId={}&minPrice=20&maxPrice=20", books["id"], tag["id"])))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(hits, json!([fetched]));

    let untagged: Value = client
        .delete(format!("{offer_url}/tags"))
        .json(&json!({"id": tag["id"]}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(untagged["tags"], json!([]));

    assert_eq!(client.delete(&offer_url).send().await?.status(), HttpStatusCode::NO_CONTENT);
    assert_eq!(client.get(&offer_url).send().await?.status(), HttpStatusCode::NOT_FOUND);

    client.delete(url(&format!("/tags/{}", tag["id"]))).send().await?;
    client.delete(url(&format!("/categories/{}", books["id"]))).send().await?;
    Ok(())
}
