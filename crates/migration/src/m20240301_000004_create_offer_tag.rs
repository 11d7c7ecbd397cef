//! Create `offer_tag` join table for the offer <-> tag many-to-many link.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OfferTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OfferTag::OfferId).big_integer().not_null())
                    .col(ColumnDef::new(OfferTag::TagId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_offer_tag")
                            .col(OfferTag::OfferId)
                            .col(OfferTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offer_tag_offer")
                            .from(OfferTag::Table, OfferTag::OfferId)
                            .to(Offer::Table, Offer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offer_tag_tag")
                            .from(OfferTag::Table, OfferTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OfferTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OfferTag { Table, OfferId, TagId }

#[derive(DeriveIden)]
enum Offer { Table, Id }

#[derive(DeriveIden)]
enum Tag { Table, Id }
