//! Entity-level tests against an in-memory SQLite database migrated with the
//! real migrators.

use migration::{CoffeeShopMigrator, MigratorTrait, TriviaMigrator};
use sea_orm::{Database, DatabaseConnection, EntityTrait};

use crate::{category, drink, errors::ModelError, question};

async fn trivia_db() -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    TriviaMigrator::up(&db, None).await?;
    Ok(db)
}

async fn coffee_db() -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    CoffeeShopMigrator::up(&db, None).await?;
    Ok(db)
}

fn part(color: &str, name: &str, parts: i32) -> drink::RecipePart {
    drink::RecipePart { color: color.into(), name: name.into(), parts }
}

#[tokio::test]
async fn category_labels_follow_requested_order() -> anyhow::Result<()> {
    let db = trivia_db().await?;
    let by_id = category::labels(&db, category::LabelOrder::ById).await?;
    assert_eq!(by_id, migration::DEFAULT_CATEGORIES);

    let by_type = category::labels(&db, category::LabelOrder::ByType).await?;
    let mut sorted = by_id.clone();
    sorted.sort();
    assert_eq!(by_type, sorted);
    Ok(())
}

#[tokio::test]
async fn question_create_and_delete() -> anyhow::Result<()> {
    let db = trivia_db().await?;
    let q = question::create(&db, question::NewQuestion {
        question: "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?".into(),
        answer: "Maya Angelou".into(),
        category: 4,
        difficulty: 2,
    }).await?;
    assert!(q.id > 0);

    let found = question::Entity::find_by_id(q.id).one(&db).await?;
    assert_eq!(found.as_ref().map(|f| f.answer.as_str()), Some("Maya Angelou"));

    assert!(question::delete(&db, q.id).await?);
    assert!(!question::delete(&db, q.id).await?);
    assert!(question::Entity::find_by_id(q.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn question_validation_rejects_blank_and_out_of_range() -> anyhow::Result<()> {
    let db = trivia_db().await?;
    let blank = question::create(&db, question::NewQuestion { question: " ".into(), answer: "A".into(), category: 1, difficulty: 1 }).await;
    assert!(matches!(blank, Err(ModelError::Validation(_))));

    let hard = question::create(&db, question::NewQuestion { question: "Q".into(), answer: "A".into(), category: 1, difficulty: 9 }).await;
    assert!(matches!(hard, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn question_with_unknown_category_is_a_db_error() -> anyhow::Result<()> {
    let db = trivia_db().await?;
    let res = question::create(&db, question::NewQuestion { question: "Q".into(), answer: "A".into(), category: 999, difficulty: 1 }).await;
    assert!(matches!(res, Err(ModelError::Db(_))));
    Ok(())
}

#[tokio::test]
async fn drink_short_hides_ingredient_names() -> anyhow::Result<()> {
    let db = coffee_db().await?;
    let d = drink::create(&db, "Water", &[part("blue", "water", 1)]).await?;

    let short = d.short()?;
    assert_eq!(short.recipe, vec![drink::ShortRecipePart { color: "blue".into(), parts: 1 }]);
    let json = serde_json::to_value(&short)?;
    assert!(json["recipe"][0].get("name").is_none());

    let long = d.long()?;
    assert_eq!(long.recipe[0].name, "water");
    Ok(())
}

#[tokio::test]
async fn drink_update_replaces_only_given_fields() -> anyhow::Result<()> {
    let db = coffee_db().await?;
    let d = drink::create(&db, "Latte", &[part("brown", "espresso", 1), part("white", "milk", 3)]).await?;

    let renamed = drink::update(&db, d.id, Some("Flat White"), None).await?;
    assert_eq!(renamed.title, "Flat White");
    assert_eq!(renamed.recipe, d.recipe);

    let unchanged = drink::update(&db, d.id, None, None).await?;
    assert_eq!(unchanged, renamed);

    let missing = drink::update(&db, d.id + 100, Some("Nope"), None).await;
    assert!(matches!(missing, Err(ModelError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn drink_titles_are_unique() -> anyhow::Result<()> {
    let db = coffee_db().await?;
    drink::create(&db, "Mocha", &[part("brown", "coffee", 2)]).await?;
    let dup = drink::create(&db, "Mocha", &[part("brown", "coffee", 2)]).await;
    assert!(matches!(dup, Err(ModelError::Db(_))));
    Ok(())
}

#[test]
fn recipe_input_accepts_one_or_many() {
    let one: drink::RecipeInput = serde_json::from_str(r#"{"color":"blue","name":"water","parts":1}"#).unwrap();
    assert_eq!(one.into_parts().len(), 1);
    let many: drink::RecipeInput = serde_json::from_str(
        r#"[{"color":"blue","name":"water","parts":1},{"color":"green","name":"matcha","parts":2}]"#,
    ).unwrap();
    assert_eq!(many.into_parts().len(), 2);
}

#[test]
fn drink_validation() {
    assert!(drink::validate_title("").is_err());
    assert!(drink::validate_title(&"x".repeat(81)).is_err());
    assert!(drink::validate_recipe(&[]).is_err());
    assert!(drink::validate_recipe(&[part("red", "grenadine", 0)]).is_err());
    assert!(drink::validate_recipe(&[part("red", "grenadine", 1)]).is_ok());
}

#[tokio::test]
async fn configured_pool_serves_the_trivia_schema() -> anyhow::Result<()> {
    let cfg = crate::db::DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = crate::db::connect_with_config(&cfg).await?;
    TriviaMigrator::up(&db, None).await?;
    assert_eq!(category::Entity::find().all(&db).await?.len(), migration::DEFAULT_CATEGORIES.len());
    Ok(())
}
