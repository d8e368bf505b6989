//! Create `category` table and seed the default labels.
use sea_orm_migration::{prelude::*, schema::*};
use sea_orm_migration::sea_orm::ConnectionTrait;

pub const DEFAULT_CATEGORIES: &[&str] = &["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(pk_auto(Category::Id))
                    .col(string(Category::Type).not_null())
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(Category::Table).columns([Category::Type]);
        for label in DEFAULT_CATEGORIES {
            seed.values([Expr::value(*label)])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }
        let db = manager.get_connection();
        db.execute(db.get_database_backend().build(&seed)).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Category { Table, Id, Type }
