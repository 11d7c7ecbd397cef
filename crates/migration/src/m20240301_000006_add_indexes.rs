use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Offer: lookups by category and by price
        manager
            .create_index(
                Index::create()
                    .name("idx_offer_category")
                    .table(Offer::Table)
                    .col(Offer::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_offer_price")
                    .table(Offer::Table)
                    .col(Offer::Price)
                    .to_owned(),
            )
            .await?;

        // OfferTag: reverse lookup tag -> offers (the PK already leads with offer_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_offer_tag_tag")
                    .table(OfferTag::Table)
                    .col(OfferTag::TagId)
                    .to_owned(),
            )
            .await?;

        // Customer: name lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_first_name")
                    .table(Customer::Table)
                    .col(Customer::FirstName)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_last_name")
                    .table(Customer::Table)
                    .col(Customer::LastName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_offer_category").table(Offer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_offer_price").table(Offer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_offer_tag_tag").table(OfferTag::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customer_first_name").table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customer_last_name").table(Customer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Offer { Table, CategoryId, Price }

#[derive(DeriveIden)]
enum OfferTag { Table, TagId }

#[derive(DeriveIden)]
enum Customer { Table, FirstName, LastName }
