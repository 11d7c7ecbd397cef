use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Category, NewCategory};
use super::repository::CategoryRepository;
use crate::errors::ServiceError;

/// Category CRUD. Lookups and updates of unknown ids yield `None`;
/// the HTTP layer decides how to report that.
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self { Self { repo } }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, ServiceError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn save(&self, input: NewCategory) -> Result<Category, ServiceError> {
        let created = self.repo.insert(&input.name).await?;
        info!(category_id = created.id, "category_created");
        Ok(created)
    }

    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn save_all(&self, inputs: Vec<NewCategory>) -> Result<Vec<Category>, ServiceError> {
        let names: Vec<String> = inputs.into_iter().map(|c| c.name).collect();
        let created = self.repo.insert_many(&names).await?;
        info!("categories_created");
        Ok(created)
    }

    /// `None` when `category.id` does not exist; nothing is written then.
    #[instrument(skip(self, category), fields(category_id = category.id))]
    pub async fn update(&self, category: Category) -> Result<Option<Category>, ServiceError> {
        if self.repo.find_by_id(category.id).await?.is_none() {
            return Ok(None);
        }
        let updated = self.repo.update(&category).await?;
        info!("category_updated");
        Ok(updated)
    }

    pub async fn delete(&self, category: &Category) -> Result<bool, ServiceError> {
        self.delete_by_id(category.id).await
    }

    /// Offers in this category lose their category reference.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete(id).await?;
        if deleted { info!("category_deleted"); }
        Ok(deleted)
    }
}
