//! In-memory repositories for tests. Repositories built with [`linked`]
//! mirror the schema's delete rules: removing a category clears it from
//! offers (`SET NULL`) and removing a tag drops its links (`CASCADE`).
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::domain::{unique_sorted, Category, OfferDraft, OfferFilter, OfferRow, Tag};
use super::repository::{CategoryRepository, OfferRepository, TagRepository};
use crate::errors::ServiceError;

#[derive(Debug)]
struct Table<T> {
    last_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self { Self { last_id: 0, rows: BTreeMap::new() } }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn many(&self, ids: &[i64]) -> Vec<T> {
        self.rows.iter().filter(|(id, _)| ids.contains(id)).map(|(_, v)| v.clone()).collect()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

/// Offer, category and tag repositories sharing delete rules.
pub fn linked() -> (Arc<InMemoryOfferRepository>, Arc<InMemoryCategoryRepository>, Arc<InMemoryTagRepository>) {
    let offers = Arc::new(InMemoryOfferRepository::default());
    let categories = Arc::new(InMemoryCategoryRepository { offers: Some(offers.clone()), ..Default::default() });
    let tags = Arc::new(InMemoryTagRepository { offers: Some(offers.clone()), ..Default::default() });
    (offers, categories, tags)
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    table: Mutex<Table<Category>>,
    offers: Option<Arc<InMemoryOfferRepository>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, ServiceError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>, ServiceError> {
        Ok(self.table.lock().await.many(ids))
    }

    async fn find_all(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.table.lock().await.all())
    }

    async fn insert(&self, name: &str) -> Result<Category, ServiceError> {
        let mut table = self.table.lock().await;
        let c = Category { id: table.next_id(), name: name.to_string() };
        table.rows.insert(c.id, c.clone());
        Ok(c)
    }

    async fn insert_many(&self, names: &[String]) -> Result<Vec<Category>, ServiceError> {
        let mut table = self.table.lock().await;
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            let c = Category { id: table.next_id(), name: name.clone() };
            table.rows.insert(c.id, c.clone());
            created.push(c);
        }
        Ok(created)
    }

    async fn update(&self, category: &Category) -> Result<Option<Category>, ServiceError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.get_mut(&category.id).map(|slot| {
            *slot = category.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let removed = self.table.lock().await.rows.remove(&id).is_some();
        if let (true, Some(offers)) = (removed, &self.offers) {
            offers.detach_category(id).await;
        }
        Ok(removed)
    }
}

#[derive(Default)]
pub struct InMemoryTagRepository {
    table: Mutex<Table<Tag>>,
    offers: Option<Arc<InMemoryOfferRepository>>,
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, ServiceError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>, ServiceError> {
        Ok(self.table.lock().await.many(ids))
    }

    async fn find_all(&self) -> Result<Vec<Tag>, ServiceError> {
        Ok(self.table.lock().await.all())
    }

    async fn insert(&self, name: &str) -> Result<Tag, ServiceError> {
        let mut table = self.table.lock().await;
        let t = Tag { id: table.next_id(), name: name.to_string() };
        table.rows.insert(t.id, t.clone());
        Ok(t)
    }

    async fn insert_many(&self, names: &[String]) -> Result<Vec<Tag>, ServiceError> {
        let mut table = self.table.lock().await;
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            let t = Tag { id: table.next_id(), name: name.clone() };
            table.rows.insert(t.id, t.clone());
            created.push(t);
        }
        Ok(created)
    }

    async fn update(&self, tag: &Tag) -> Result<Option<Tag>, ServiceError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.get_mut(&tag.id).map(|slot| {
            *slot = tag.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let removed = self.table.lock().await.rows.remove(&id).is_some();
        if let (true, Some(offers)) = (removed, &self.offers) {
            offers.detach_tag(id).await;
        }
        Ok(removed)
    }
}

#[derive(Default)]
pub struct InMemoryOfferRepository {
    table: Mutex<Table<OfferRow>>,
}

impl InMemoryOfferRepository {
    async fn modify(&self, offer_id: i64, f: impl FnOnce(&mut OfferRow) + Send) -> Result<(), ServiceError> {
        let mut table = self.table.lock().await;
        let row = table.rows.get_mut(&offer_id).ok_or_else(|| ServiceError::not_found("offer", offer_id))?;
        f(row);
        Ok(())
    }

    async fn detach_category(&self, category_id: i64) {
        for row in self.table.lock().await.rows.values_mut() {
            if row.category_id == Some(category_id) {
                row.category_id = None;
            }
        }
    }

    async fn detach_tag(&self, tag_id: i64) {
        for row in self.table.lock().await.rows.values_mut() {
            row.tag_ids.retain(|&t| t != tag_id);
        }
    }
}

#[async_trait]
impl OfferRepository for InMemoryOfferRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<OfferRow>, ServiceError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<OfferRow>, ServiceError> {
        Ok(self.table.lock().await.all())
    }

    async fn find_by_filter(&self, filter: &OfferFilter) -> Result<Vec<OfferRow>, ServiceError> {
        Ok(self.table.lock().await.rows.values().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn insert(&self, draft: &OfferDraft) -> Result<OfferRow, ServiceError> {
        let mut table = self.table.lock().await;
        let row = OfferRow {
            id: table.next_id(),
            name: draft.name.clone(),
            price: draft.price,
            description: draft.description.clone(),
            category_id: draft.category_id,
            tag_ids: unique_sorted(draft.tag_ids.clone()),
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, draft: &OfferDraft) -> Result<Option<OfferRow>, ServiceError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            row.name = draft.name.clone();
            row.price = draft.price;
            row.description = draft.description.clone();
            row.category_id = draft.category_id;
            row.tag_ids = unique_sorted(draft.tag_ids.clone());
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }

    async fn add_tag(&self, offer_id: i64, tag_id: i64) -> Result<(), ServiceError> {
        self.modify(offer_id, |row| {
            if let Err(pos) = row.tag_ids.binary_search(&tag_id) {
                row.tag_ids.insert(pos, tag_id);
            }
        })
        .await
    }

    async fn remove_tag(&self, offer_id: i64, tag_id: i64) -> Result<(), ServiceError> {
        self.modify(offer_id, |row| row.tag_ids.retain(|&t| t != tag_id)).await
    }

    async fn replace_tags(&self, offer_id: i64, tag_ids: &[i64]) -> Result<(), ServiceError> {
        let tag_ids = unique_sorted(tag_ids.to_vec());
        self.modify(offer_id, move |row| row.tag_ids = tag_ids).await
    }

    async fn set_category(&self, offer_id: i64, category_id: Option<i64>) -> Result<(), ServiceError> {
        self.modify(offer_id, |row| row.category_id = category_id).await
    }
}
