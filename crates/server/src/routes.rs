use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod categories;
pub mod customers;
pub mod offers;
pub mod tags;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Full route table. Literal segments (`/offers/filter`, `/categories/list`)
/// take precedence over the `:id` captures next to them.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let offers = Router::new()
        .route("/offers", get(offers::list).post(offers::create).put(offers::update))
        .route("/offers/filter", get(offers::filter))
        .route("/offers/:id", get(offers::get_one).delete(offers::delete_one))
        .route("/offers/:id/categories", put(offers::change_category))
        .route("/offers/:id/tags", put(offers::add_tag).delete(offers::remove_tag));

    let categories = Router::new()
        .route("/categories", get(categories::list).post(categories::create).put(categories::update))
        .route("/categories/list", post(categories::create_many))
        .route("/categories/:id", get(categories::get_one).delete(categories::delete_one));

    let tags = Router::new()
        .route("/tags", get(tags::list).post(tags::create).put(tags::update))
        .route("/tags/list", post(tags::create_many))
        .route("/tags/:id", get(tags::get_one).delete(tags::delete_one));

    let customers = Router::new()
        .route("/customers", get(customers::list).post(customers::create).put(customers::update))
        .route("/customers/:id", get(customers::get_one).delete(customers::delete_one));

    Router::new()
        .route("/health", get(health))
        .merge(offers)
        .merge(categories)
        .merge(tags)
        .merge(customers)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求一个 span，记录方法与路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
