//! Create `question` table.
//!
//! `category` references `category.id`; removing a category removes its questions.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20200401_000001_create_category::Category;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Question::Table)
                    .if_not_exists()
                    .col(pk_auto(Question::Id))
                    .col(text(Question::Question).not_null())
                    .col(text(Question::Answer).not_null())
                    .col(integer(Question::Category).not_null())
                    .col(integer(Question::Difficulty).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_category")
                            .from(Question::Table, Question::Category)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_question_category")
                    .table(Question::Table)
                    .col(Question::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Question::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Question { Table, Id, Question, Answer, Category, Difficulty }
