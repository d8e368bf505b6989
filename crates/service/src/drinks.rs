use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use models::drink::{self, DrinkLong, DrinkShort, RecipePart};

use crate::errors::ServiceError;

/// Public menu: every drink with ingredient names withheld. `NotFound` when empty.
pub async fn menu(db: &DatabaseConnection) -> Result<Vec<DrinkShort>, ServiceError> {
    let rows = drink::list(db).await?;
    if rows.is_empty() {
        return Err(ServiceError::not_found("drinks"));
    }
    Ok(rows.iter().map(drink::Model::short).collect::<Result<_, _>>()?)
}

/// Full recipes for staff. `NotFound` when empty.
pub async fn detailed_menu(db: &DatabaseConnection) -> Result<Vec<DrinkLong>, ServiceError> {
    let rows = drink::list(db).await?;
    if rows.is_empty() {
        return Err(ServiceError::not_found("drinks"));
    }
    Ok(rows.iter().map(drink::Model::long).collect::<Result<_, _>>()?)
}

#[instrument(skip(db, recipe), fields(parts = recipe.len()))]
pub async fn create_drink(db: &DatabaseConnection, title: &str, recipe: &[RecipePart]) -> Result<DrinkLong, ServiceError> {
    let created = drink::create(db, title, recipe).await?;
    info!(id = created.id, title = %created.title, "drink_created");
    Ok(created.long()?)
}

#[instrument(skip(db, recipe))]
pub async fn update_drink(
    db: &DatabaseConnection,
    id: i32,
    title: Option<&str>,
    recipe: Option<&[RecipePart]>,
) -> Result<DrinkLong, ServiceError> {
    let updated = drink::update(db, id, title, recipe).await.map_err(|e| match e {
        models::errors::ModelError::NotFound(_) => ServiceError::not_found("drink"),
        other => ServiceError::Model(other),
    })?;
    info!(id = updated.id, "drink_updated");
    Ok(updated.long()?)
}

#[instrument(skip(db))]
pub async fn delete_drink(db: &DatabaseConnection, id: i32) -> Result<i32, ServiceError> {
    if !drink::delete(db, id).await? {
        return Err(ServiceError::not_found("drink"));
    }
    info!(id, "drink_deleted");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::coffee_db;

    fn water() -> Vec<RecipePart> {
        vec![RecipePart { color: "blue".into(), name: "water".into(), parts: 1 }]
    }

    #[tokio::test]
    async fn empty_menu_is_not_found() -> anyhow::Result<()> {
        let db = coffee_db().await?;
        assert!(matches!(menu(&db).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(detailed_menu(&db).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn drink_lifecycle() -> anyhow::Result<()> {
        let db = coffee_db().await?;
        let created = create_drink(&db, "Water", &water()).await?;
        assert_eq!(created.recipe, water());

        let short = menu(&db).await?;
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].recipe[0].color, "blue");

        let updated = update_drink(&db, created.id, Some("Sparkling Water"), None).await?;
        assert_eq!(updated.title, "Sparkling Water");
        assert_eq!(detailed_menu(&db).await?[0].title, "Sparkling Water");

        assert_eq!(delete_drink(&db, created.id).await?, created.id);
        assert!(matches!(delete_drink(&db, created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(update_drink(&db, created.id, Some("x"), None).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_recipe_is_a_model_error() -> anyhow::Result<()> {
        let db = coffee_db().await?;
        let res = create_drink(&db, "Nothing", &[]).await;
        assert!(matches!(res, Err(ServiceError::Model(_))));
        Ok(())
    }
}
