use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{category, errors, offer_tag, tag};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, OfferTag }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::OfferTag => Entity::has_many(offer_tag::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<offer_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::OfferTag.def() }
}

impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { offer_tag::Relation::Tag.def() }
    fn via() -> Option<RelationDef> { Some(offer_tag::Relation::Offer.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    price: f64,
    description: Option<&str>,
    category_id: Option<i64>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        price: Set(price),
        description: Set(description.map(str::to_string)),
        category_id: Set(category_id),
    };
    Ok(am.insert(db).await?)
}

pub async fn set_category<C: ConnectionTrait>(db: &C, id: i64, category_id: Option<i64>) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound(format!("offer {id}")))?
        .into();
    found.category_id = Set(category_id);
    Ok(found.update(db).await?)
}
