use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{unique_sorted, Offer, OfferDraft, OfferFilter, OfferRow};
use super::repository::{CategoryRepository, OfferRepository, TagRepository};
use crate::errors::ServiceError;

/// Offer use cases. Every write checks that the offer and any referenced
/// category or tags exist before touching persistence.
pub struct OfferService {
    offers: Arc<dyn OfferRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl OfferService {
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self { offers, categories, tags }
    }

    pub async fn find_all(&self) -> Result<Vec<Offer>, ServiceError> {
        let rows = self.offers.find_all().await?;
        self.hydrate(rows).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Offer, ServiceError> {
        let row = self.require_offer(id).await?;
        let mut hydrated = self.hydrate(vec![row]).await?;
        hydrated.pop().ok_or_else(|| ServiceError::not_found("offer", id))
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn save(&self, draft: OfferDraft) -> Result<Offer, ServiceError> {
        let draft = draft.normalized();
        self.ensure_references(draft.category_id, &draft.tag_ids).await?;
        let row = self.offers.insert(&draft).await?;
        info!(offer_id = row.id, "offer_created");
        self.find_by_id(row.id).await
    }

    /// Replace every field of offer `id`, including its tag set.
    #[instrument(skip(self, draft), fields(offer_id = id))]
    pub async fn update(&self, id: i64, draft: OfferDraft) -> Result<Offer, ServiceError> {
        let draft = draft.normalized();
        self.require_offer(id).await?;
        self.ensure_references(draft.category_id, &draft.tag_ids).await?;
        self.offers
            .update(id, &draft)
            .await?
            .ok_or_else(|| ServiceError::not_found("offer", id))?;
        info!("offer_updated");
        self.find_by_id(id).await
    }

    pub async fn delete(&self, offer: &Offer) -> Result<(), ServiceError> {
        self.delete_by_id(offer.id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        if !self.offers.delete(id).await? {
            return Err(ServiceError::not_found("offer", id));
        }
        info!(offer_id = id, "offer_deleted");
        Ok(())
    }

    pub async fn find_by_tag(&self, tag_id: i64) -> Result<Vec<Offer>, ServiceError> {
        self.find_by_params(OfferFilter::by_tag(tag_id)).await
    }

    pub async fn find_by_category(&self, category_id: i64) -> Result<Vec<Offer>, ServiceError> {
        self.find_by_params(OfferFilter::by_category(category_id)).await
    }

    pub async fn find_by_price(&self, price: f64) -> Result<Vec<Offer>, ServiceError> {
        self.find_by_params(OfferFilter::by_price(price)).await
    }

    pub async fn find_by_params(&self, filter: OfferFilter) -> Result<Vec<Offer>, ServiceError> {
        let rows = self.offers.find_by_filter(&filter).await?;
        debug!(count = rows.len(), "offers matched filter");
        self.hydrate(rows).await
    }

    #[instrument(skip(self))]
    pub async fn add_tag(&self, offer_id: i64, tag_id: i64) -> Result<Offer, ServiceError> {
        self.require_offer(offer_id).await?;
        self.ensure_references(None, &[tag_id]).await?;
        self.offers.add_tag(offer_id, tag_id).await?;
        info!("offer_tag_added");
        self.find_by_id(offer_id).await
    }

    /// Removing a tag the offer does not carry leaves it unchanged.
    #[instrument(skip(self))]
    pub async fn remove_tag(&self, offer_id: i64, tag_id: i64) -> Result<Offer, ServiceError> {
        self.require_offer(offer_id).await?;
        self.offers.remove_tag(offer_id, tag_id).await?;
        info!("offer_tag_removed");
        self.find_by_id(offer_id).await
    }

    #[instrument(skip(self, tag_ids))]
    pub async fn replace_tags(&self, offer_id: i64, tag_ids: Vec<i64>) -> Result<Offer, ServiceError> {
        let tag_ids = unique_sorted(tag_ids);
        self.require_offer(offer_id).await?;
        self.ensure_references(None, &tag_ids).await?;
        self.offers.replace_tags(offer_id, &tag_ids).await?;
        info!(count = tag_ids.len(), "offer_tags_replaced");
        self.find_by_id(offer_id).await
    }

    #[instrument(skip(self))]
    pub async fn change_category(&self, offer_id: i64, category_id: i64) -> Result<Offer, ServiceError> {
        self.require_offer(offer_id).await?;
        self.ensure_references(Some(category_id), &[]).await?;
        self.offers.set_category(offer_id, Some(category_id)).await?;
        info!("offer_category_changed");
        self.find_by_id(offer_id).await
    }

    async fn require_offer(&self, id: i64) -> Result<OfferRow, ServiceError> {
        self.offers.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("offer", id))
    }

    /// `tag_ids` must already be unique.
    async fn ensure_references(&self, category_id: Option<i64>, tag_ids: &[i64]) -> Result<(), ServiceError> {
        if let Some(cid) = category_id {
            if self.categories.find_by_id(cid).await?.is_none() {
                return Err(ServiceError::not_found("category", cid));
            }
        }
        if !tag_ids.is_empty() {
            let found = self.tags.find_by_ids(tag_ids).await?;
            if let Some(missing) = tag_ids.iter().find(|id| !found.iter().any(|t| t.id == **id)) {
                return Err(ServiceError::not_found("tag", *missing));
            }
        }
        Ok(())
    }

    async fn hydrate(&self, rows: Vec<OfferRow>) -> Result<Vec<Offer>, ServiceError> {
        let category_ids = unique_sorted(rows.iter().filter_map(|r| r.category_id).collect());
        let tag_ids = unique_sorted(rows.iter().flat_map(|r| r.tag_ids.iter().copied()).collect());

        let categories: HashMap<i64, _> = self
            .categories
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let tags: HashMap<i64, _> = self
            .tags
            .find_by_ids(&tag_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(rows
            .into_iter()
            .map(|r| Offer {
                id: r.id,
                name: r.name,
                price: r.price,
                description: r.description,
                category: r.category_id.and_then(|id| categories.get(&id).cloned()),
                tags: r.tag_ids.iter().filter_map(|id| tags.get(id).cloned()).collect(),
            })
            .collect())
    }
}
