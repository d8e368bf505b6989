//! Create `drink` table. `recipe` holds the JSON list of recipe parts.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drink::Table)
                    .if_not_exists()
                    .col(pk_auto(Drink::Id))
                    .col(string_len(Drink::Title, 80).unique_key().not_null())
                    .col(text(Drink::Recipe).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Drink::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Drink { Table, Id, Title, Recipe }
