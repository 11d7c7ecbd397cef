use async_trait::async_trait;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use models::{category, offer, offer_tag, tag};

use crate::catalog::domain::{Category, OfferDraft, OfferFilter, OfferRow, Tag};
use crate::catalog::repository::{CategoryRepository, OfferRepository, TagRepository};
use crate::errors::ServiceError;

pub struct SeaOrmCategoryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, ServiceError> {
        Ok(category::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>, ServiceError> {
        if ids.is_empty() { return Ok(Vec::new()); }
        Ok(category::Entity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(category::Entity::find().order_by_asc(category::Column::Id).all(&self.db).await?)
    }

    async fn insert(&self, name: &str) -> Result<Category, ServiceError> {
        Ok(category::create(&self.db, name).await?)
    }

    async fn insert_many(&self, names: &[String]) -> Result<Vec<Category>, ServiceError> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(category::create(&txn, name).await?);
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn update(&self, c: &Category) -> Result<Option<Category>, ServiceError> {
        let Some(existing) = category::Entity::find_by_id(c.id).one(&self.db).await? else { return Ok(None) };
        let mut am: category::ActiveModel = existing.into();
        am.name = Set(c.name.clone());
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmTagRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TagRepository for SeaOrmTagRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, ServiceError> {
        Ok(tag::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>, ServiceError> {
        if ids.is_empty() { return Ok(Vec::new()); }
        Ok(tag::Entity::find()
            .filter(tag::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<Tag>, ServiceError> {
        Ok(tag::Entity::find().order_by_asc(tag::Column::Id).all(&self.db).await?)
    }

    async fn insert(&self, name: &str) -> Result<Tag, ServiceError> {
        Ok(tag::create(&self.db, name).await?)
    }

    async fn insert_many(&self, names: &[String]) -> Result<Vec<Tag>, ServiceError> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(tag::create(&txn, name).await?);
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn update(&self, t: &Tag) -> Result<Option<Tag>, ServiceError> {
        let Some(existing) = tag::Entity::find_by_id(t.id).one(&self.db).await? else { return Ok(None) };
        let mut am: tag::ActiveModel = existing.into();
        am.name = Set(t.name.clone());
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = tag::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmOfferRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOfferRepository {
    /// Attach tag ids to loaded offer models, preserving order.
    async fn with_tags(&self, found: Vec<offer::Model>) -> Result<Vec<OfferRow>, ServiceError> {
        let ids: Vec<i64> = found.iter().map(|m| m.id).collect();
        let links = offer_tag::tag_ids_for(&self.db, &ids).await?;
        Ok(found
            .into_iter()
            .zip(links)
            .map(|(m, (_, tag_ids))| OfferRow::from_model(m, tag_ids))
            .collect())
    }
}

#[async_trait]
impl OfferRepository for SeaOrmOfferRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<OfferRow>, ServiceError> {
        let Some(m) = offer::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        Ok(self.with_tags(vec![m]).await?.pop())
    }

    async fn find_all(&self) -> Result<Vec<OfferRow>, ServiceError> {
        let found = offer::Entity::find().order_by_asc(offer::Column::Id).all(&self.db).await?;
        self.with_tags(found).await
    }

    async fn find_by_filter(&self, filter: &OfferFilter) -> Result<Vec<OfferRow>, ServiceError> {
        let mut finder = offer::Entity::find();
        if let Some(cid) = filter.category_id { finder = finder.filter(offer::Column::CategoryId.eq(cid)); }
        if let Some(min) = filter.min_price { finder = finder.filter(offer::Column::Price.gte(min)); }
        if let Some(max) = filter.max_price { finder = finder.filter(offer::Column::Price.lte(max)); }
        if let Some(tid) = filter.tag_id {
            let tagged = Query::select()
                .column(offer_tag::Column::OfferId)
                .from(offer_tag::Entity)
                .and_where(offer_tag::Column::TagId.eq(tid))
                .to_owned();
            finder = finder.filter(offer::Column::Id.in_subquery(tagged));
        }
        let found = finder.order_by_asc(offer::Column::Id).all(&self.db).await?;
        debug!(?filter, count = found.len(), "offer filter");
        self.with_tags(found).await
    }

    async fn insert(&self, draft: &OfferDraft) -> Result<OfferRow, ServiceError> {
        let txn = self.db.begin().await?;
        let created = offer::create(&txn, &draft.name, draft.price, draft.description.as_deref(), draft.category_id).await?;
        offer_tag::link(&txn, created.id, &draft.tag_ids).await?;
        txn.commit().await?;
        Ok(OfferRow::from_model(created, draft.tag_ids.clone()))
    }

    async fn update(&self, id: i64, draft: &OfferDraft) -> Result<Option<OfferRow>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(existing) = offer::Entity::find_by_id(id).one(&txn).await? else { return Ok(None) };
        let mut am: offer::ActiveModel = existing.into();
        am.name = Set(draft.name.clone());
        am.price = Set(draft.price);
        am.description = Set(draft.description.clone());
        am.category_id = Set(draft.category_id);
        let updated = am.update(&txn).await?;
        offer_tag::unlink_all(&txn, id).await?;
        offer_tag::link(&txn, id, &draft.tag_ids).await?;
        txn.commit().await?;
        Ok(Some(OfferRow::from_model(updated, draft.tag_ids.clone())))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        // offer_tag rows go with the offer (ON DELETE CASCADE)
        let res = offer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn add_tag(&self, offer_id: i64, tag_id: i64) -> Result<(), ServiceError> {
        Ok(offer_tag::link(&self.db, offer_id, &[tag_id]).await?)
    }

    async fn remove_tag(&self, offer_id: i64, tag_id: i64) -> Result<(), ServiceError> {
        Ok(offer_tag::unlink(&self.db, offer_id, tag_id).await?)
    }

    async fn replace_tags(&self, offer_id: i64, tag_ids: &[i64]) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        offer_tag::unlink_all(&txn, offer_id).await?;
        offer_tag::link(&txn, offer_id, tag_ids).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn set_category(&self, offer_id: i64, category_id: Option<i64>) -> Result<(), ServiceError> {
        offer::set_category(&self.db, offer_id, category_id).await?;
        Ok(())
    }
}
