//! Join rows linking offers to tags. The composite key keeps each link unique.
use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, offer, tag};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offer_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub offer_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Offer, Tag }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Offer => Entity::belongs_to(offer::Entity).from(Column::OfferId).to(offer::Column::Id).into(),
            Relation::Tag => Entity::belongs_to(tag::Entity).from(Column::TagId).to(tag::Column::Id).into(),
        }
    }
}

impl Related<offer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Offer.def() }
}

impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tag.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert links, skipping ones that already exist.
pub async fn link<C: ConnectionTrait>(db: &C, offer_id: i64, tag_ids: &[i64]) -> Result<(), errors::ModelError> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let rows = tag_ids.iter().map(|&tag_id| ActiveModel { offer_id: Set(offer_id), tag_id: Set(tag_id) });
    Entity::insert_many(rows)
        .on_conflict(OnConflict::columns([Column::OfferId, Column::TagId]).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

pub async fn unlink<C: ConnectionTrait>(db: &C, offer_id: i64, tag_id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_many()
        .filter(Column::OfferId.eq(offer_id))
        .filter(Column::TagId.eq(tag_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn unlink_all<C: ConnectionTrait>(db: &C, offer_id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_many().filter(Column::OfferId.eq(offer_id)).exec(db).await?;
    Ok(())
}

/// Tag ids per offer, for the given offers, each list sorted ascending.
pub async fn tag_ids_for<C: ConnectionTrait>(db: &C, offer_ids: &[i64]) -> Result<Vec<(i64, Vec<i64>)>, errors::ModelError> {
    if offer_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = Entity::find()
        .filter(Column::OfferId.is_in(offer_ids.iter().copied()))
        .all(db)
        .await?;
    let mut out: Vec<(i64, Vec<i64>)> = offer_ids.iter().map(|&id| (id, Vec::new())).collect();
    for row in rows {
        if let Some((_, ids)) = out.iter_mut().find(|(id, _)| *id == row.offer_id) {
            ids.push(row.tag_id);
        }
    }
    for (_, ids) in out.iter_mut() {
        ids.sort_unstable();
    }
    Ok(out)
}
