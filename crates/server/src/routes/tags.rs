use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use service::catalog::domain::{Tag, NewTag};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

fn missing(id: i64) -> JsonApiError {
    JsonApiError::not_found(format!("tag {} not found", id))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, JsonApiError> {
    Ok(Json(state.tags.find_all().await?))
}

pub async fn get_one(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Tag>, JsonApiError> {
    state.tags.find_by_id(id).await?.map(Json).ok_or_else(|| missing(id))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewTag>,
) -> Result<(StatusCode, Json<Tag>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(state.tags.save(input).await?)))
}

pub async fn create_many(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<Vec<NewTag>>,
) -> Result<(StatusCode, Json<Vec<Tag>>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(state.tags.save_all(input).await?)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<Tag>,
) -> Result<Json<Tag>, JsonApiError> {
    let id = input.id;
    state.tags.update(input).await?.map(Json).ok_or_else(|| missing(id))
}

pub async fn delete_one(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    match state.tags.delete_by_id(id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(missing(id)),
    }
}
