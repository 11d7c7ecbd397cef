use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::customer::{Customer, NewCustomer};
use tracing::debug;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// `?name=` matches the first name, `?last_name=` the last name.
/// With both set, `name` wins.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CustomerQuery>,
) -> Result<Json<Vec<Customer>>, JsonApiError> {
    debug!(?q, "list customers");
    let found = match (q.name, q.last_name) {
        (Some(name), _) => state.customers.find_by_name(&name).await?,
        (None, Some(last)) => state.customers.find_by_last_name(&last).await?,
        (None, None) => state.customers.find_all().await?,
    };
    Ok(Json(found))
}

pub async fn get_one(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Customer>, JsonApiError> {
    Ok(Json(state.customers.find_by_id(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(state.customers.save(input).await?)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<Customer>,
) -> Result<Json<Customer>, JsonApiError> {
    Ok(Json(state.customers.update(input).await?))
}

pub async fn delete_one(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    state.customers.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
