//! Create `offer` table.
//!
//! An offer optionally belongs to a category; deleting the category detaches it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Offer::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Offer::Name, 255).not_null())
                    .col(double(Offer::Price).not_null())
                    .col(ColumnDef::new(Offer::Description).text().null())
                    .col(ColumnDef::new(Offer::CategoryId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offer_category")
                            .from(Offer::Table, Offer::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Offer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Offer {
    Table,
    Id,
    Name,
    Price,
    Description,
    CategoryId,
}

#[derive(DeriveIden)]
enum Category { Table, Id }
