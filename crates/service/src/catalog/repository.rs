use async_trait::async_trait;

use super::domain::{Category, OfferDraft, OfferFilter, OfferRow, Tag};
use crate::errors::ServiceError;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, ServiceError>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Category>, ServiceError>;
    async fn insert(&self, name: &str) -> Result<Category, ServiceError>;
    /// All-or-nothing insert of several categories.
    async fn insert_many(&self, names: &[String]) -> Result<Vec<Category>, ServiceError>;
    /// `None` when no row has `category.id`.
    async fn update(&self, category: &Category) -> Result<Option<Category>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, ServiceError>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Tag>, ServiceError>;
    async fn insert(&self, name: &str) -> Result<Tag, ServiceError>;
    async fn insert_many(&self, names: &[String]) -> Result<Vec<Tag>, ServiceError>;
    async fn update(&self, tag: &Tag) -> Result<Option<Tag>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Offer persistence over flat rows. Callers check that referenced
/// categories and tags exist before writing.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<OfferRow>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<OfferRow>, ServiceError>;
    async fn find_by_filter(&self, filter: &OfferFilter) -> Result<Vec<OfferRow>, ServiceError>;
    async fn insert(&self, draft: &OfferDraft) -> Result<OfferRow, ServiceError>;
    async fn update(&self, id: i64, draft: &OfferDraft) -> Result<Option<OfferRow>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn add_tag(&self, offer_id: i64, tag_id: i64) -> Result<(), ServiceError>;
    async fn remove_tag(&self, offer_id: i64, tag_id: i64) -> Result<(), ServiceError>;
    async fn replace_tags(&self, offer_id: i64, tag_ids: &[i64]) -> Result<(), ServiceError>;
    async fn set_category(&self, offer_id: i64, category_id: Option<i64>) -> Result<(), ServiceError>;
}
