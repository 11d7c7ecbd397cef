use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, offer, offer_tag};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { OfferTag }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::OfferTag => Entity::has_many(offer_tag::Entity).into() }
    }
}

impl Related<offer_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::OfferTag.def() }
}

impl Related<offer::Entity> for Entity {
    fn to() -> RelationDef { offer_tag::Relation::Offer.def() }
    fn via() -> Option<RelationDef> { Some(offer_tag::Relation::Tag.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    let am = ActiveModel { id: NotSet, name: Set(name.to_string()) };
    Ok(am.insert(db).await?)
}
