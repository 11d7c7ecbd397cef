use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use service::catalog::domain::{Category, NewCategory};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

fn missing(id: i64) -> JsonApiError {
    JsonApiError::not_found(format!("category {} not found", id))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, JsonApiError> {
    Ok(Json(state.categories.find_all().await?))
}

pub async fn get_one(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Category>, JsonApiError> {
    state.categories.find_by_id(id).await?.map(Json).ok_or_else(|| missing(id))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCategory>,
) -> Result<(StatusCode, Json<Category>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(state.categories.save(input).await?)))
}

pub async fn create_many(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<Vec<NewCategory>>,
) -> Result<(StatusCode, Json<Vec<Category>>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(state.categories.save_all(input).await?)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<Category>,
) -> Result<Json<Category>, JsonApiError> {
    let id = input.id;
    state.categories.update(input).await?.map(Json).ok_or_else(|| missing(id))
}

pub async fn delete_one(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    match state.categories.delete_by_id(id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(missing(id)),
    }
}
