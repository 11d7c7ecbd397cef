use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, offer};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Offer }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Offer => Entity::has_many(offer::Entity).into() }
    }
}

impl Related<offer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Offer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    let am = ActiveModel { id: NotSet, name: Set(name.to_string()) };
    Ok(am.insert(db).await?)
}
