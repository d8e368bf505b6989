#![cfg(test)]
use migration::{CoffeeShopMigrator, MigratorTrait, TriviaMigrator};
use models::question::{self, NewQuestion};
use sea_orm::{Database, DatabaseConnection};

/// Fresh in-memory trivia database with seeded categories and no questions.
pub async fn trivia_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    TriviaMigrator::up(&db, None).await?;
    Ok(db)
}

pub async fn coffee_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    CoffeeShopMigrator::up(&db, None).await?;
    Ok(db)
}

/// Insert `n` questions into `category`; returns their ids in insertion order.
pub async fn seed_questions(db: &DatabaseConnection, category: i32, n: usize, prefix: &str) -> Result<Vec<i32>, anyhow::Error> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let q = question::create(db, NewQuestion {
            question: format!("{prefix} question {i}"),
            answer: format!("{prefix} answer {i}"),
            category,
            difficulty: (i % 5) as i32 + 1,
        })
        .await?;
        ids.push(q.id);
    }
    Ok(ids)
}
