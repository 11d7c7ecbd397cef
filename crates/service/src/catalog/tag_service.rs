use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Tag, NewTag};
use super::repository::TagRepository;
use crate::errors::ServiceError;

/// Tag CRUD. Lookups and updates of unknown ids yield `None`;
/// the HTTP layer decides how to report that.
pub struct TagService {
    repo: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(repo: Arc<dyn TagRepository>) -> Self { Self { repo } }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Tag>, ServiceError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn save(&self, input: NewTag) -> Result<Tag, ServiceError> {
        let created = self.repo.insert(&input.name).await?;
        info!(tag_id = created.id, "tag_created");
        Ok(created)
    }

    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn save_all(&self, inputs: Vec<NewTag>) -> Result<Vec<Tag>, ServiceError> {
        let names: Vec<String> = inputs.into_iter().map(|c| c.name).collect();
        let created = self.repo.insert_many(&names).await?;
        info!("tags_created");
        Ok(created)
    }

    /// `None` when `tag.id` does not exist; nothing is written then.
    #[instrument(skip(self, tag), fields(tag_id = tag.id))]
    pub async fn update(&self, tag: Tag) -> Result<Option<Tag>, ServiceError> {
        if self.repo.find_by_id(tag.id).await?.is_none() {
            return Ok(None);
        }
        let updated = self.repo.update(&tag).await?;
        info!("tag_updated");
        Ok(updated)
    }

    pub async fn delete(&self, tag: &Tag) -> Result<bool, ServiceError> {
        self.delete_by_id(tag.id).await
    }

    /// Links from offers to this tag are removed with it.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete(id).await?;
        if deleted { info!("tag_deleted"); }
        Ok(deleted)
    }
}
