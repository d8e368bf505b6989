//! Migrators for the three services. Each service owns its own database, so
//! each gets its own migrator; nothing is shared between them.
pub use sea_orm_migration::prelude::*;

mod m20200401_000001_create_category;
mod m20200401_000002_create_question;
mod m20200402_000001_create_drink;
mod m20200405_000001_create_fyyur_tables;
mod m20200406_000001_genres_to_array;

/// Trivia API schema: categories (seeded) and questions.
pub struct TriviaMigrator;

#[async_trait::async_trait]
impl MigratorTrait for TriviaMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20200401_000001_create_category::Migration),
            Box::new(m20200401_000002_create_question::Migration),
        ]
    }
}

/// Coffee-shop API schema: drinks.
pub struct CoffeeShopMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CoffeeShopMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20200402_000001_create_drink::Migration)]
    }
}

/// Venue/artist listing schema. Only the tables and the `genres` column
/// change live here; the app itself is not part of this workspace.
pub struct FyyurMigrator;

#[async_trait::async_trait]
impl MigratorTrait for FyyurMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20200405_000001_create_fyyur_tables::Migration),
            // Column type change must follow table creation
            Box::new(m20200406_000001_genres_to_array::Migration),
        ]
    }
}

pub use m20200401_000001_create_category::DEFAULT_CATEGORIES;
