use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::catalog::domain::{Offer, OfferDraft, OfferFilter};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// `{"id": ..}` reference to a category or tag; other fields are ignored.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

/// Offer body for create and update. `id` is only read by update.
#[derive(Debug, Deserialize)]
pub struct OfferPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<IdRef>,
    #[serde(default)]
    pub tags: Vec<IdRef>,
}

impl OfferPayload {
    fn into_draft(self) -> OfferDraft {
        OfferDraft {
            name: self.name,
            price: self.price,
            description: self.description,
            category_id: self.category.map(|c| c.id),
            tag_ids: self.tags.into_iter().map(|t| t.id).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl From<FilterQuery> for OfferFilter {
    fn from(q: FilterQuery) -> Self {
        OfferFilter { category_id: q.category_id, tag_id: q.tag_id, min_price: q.min_price, max_price: q.max_price }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Offer>>, JsonApiError> {
    Ok(Json(state.offers.find_all().await?))
}

pub async fn get_one(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Offer>, JsonApiError> {
    Ok(Json(state.offers.find_by_id(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<OfferPayload>,
) -> Result<(StatusCode, Json<Offer>), JsonApiError> {
    let created = state.offers.save(input.into_draft()).await?;
    info!(offer_id = created.id, "offer created via api");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<OfferPayload>,
) -> Result<Json<Offer>, JsonApiError> {
    let Some(id) = input.id else {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some("offer id is required".into())));
    };
    Ok(Json(state.offers.update(id, input.into_draft()).await?))
}

pub async fn delete_one(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    state.offers.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn filter(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<FilterQuery>,
) -> Result<Json<Vec<Offer>>, JsonApiError> {
    Ok(Json(state.offers.find_by_params(q.into()).await?))
}

pub async fn change_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(category): ApiJson<IdRef>,
) -> Result<Json<Offer>, JsonApiError> {
    Ok(Json(state.offers.change_category(id, category.id).await?))
}

pub async fn add_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(tag): ApiJson<IdRef>,
) -> Result<Json<Offer>, JsonApiError> {
    Ok(Json(state.offers.add_tag(id, tag.id).await?))
}

pub async fn remove_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(tag): ApiJson<IdRef>,
) -> Result<Json<Offer>, JsonApiError> {
    Ok(Json(state.offers.remove_tag(id, tag.id).await?))
}
