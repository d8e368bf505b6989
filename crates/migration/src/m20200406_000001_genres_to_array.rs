//! Turn `genres` on `Artist` and `Venue` from `varchar` into `varchar[]`.
//!
//! Existing scalar values become one-element arrays. Array columns only exist
//! on PostgreSQL; other backends keep the scalar column untouched.
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

const UP: &[&str] = &[
    r#"alter table "Artist" alter genres type varchar[] using array[genres];"#,
    r#"alter table "Venue" alter genres type varchar[] using array[genres];"#,
];

const DOWN: &[&str] = &[
    r#"alter table "Artist" alter genres type varchar;"#,
    r#"alter table "Venue" alter genres type varchar;"#,
];

async fn run_pg(manager: &SchemaManager<'_>, stmts: &[&str]) -> Result<(), DbErr> {
    if manager.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }
    let db = manager.get_connection();
    for sql in stmts {
        db.execute_unprepared(sql).await?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        run_pg(manager, UP).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        run_pg(manager, DOWN).await
    }
}
