use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const MAX_TITLE_LEN: usize = 80;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drink")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    /// JSON-encoded `Vec<RecipePart>`.
    #[sea_orm(column_type = "Text")]
    pub recipe: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// One ingredient of a drink: its display color, name and relative parts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePart {
    pub color: String,
    pub name: String,
    pub parts: i32,
}

/// Public view of a recipe part; ingredient names are withheld.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortRecipePart {
    pub color: String,
    pub parts: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortRecipePart>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<RecipePart>,
}

/// Clients send either one part or a list of parts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<RecipePart>),
    One(RecipePart),
}

impl RecipeInput {
    pub fn into_parts(self) -> Vec<RecipePart> {
        match self {
            RecipeInput::Many(parts) => parts,
            RecipeInput::One(part) => vec![part],
        }
    }
}

impl Model {
    pub fn recipe_parts(&self) -> Result<Vec<RecipePart>, errors::ModelError> {
        Ok(serde_json::from_str(&self.recipe)?)
    }

    pub fn short(&self) -> Result<DrinkShort, errors::ModelError> {
        let recipe = self
            .recipe_parts()?
            .into_iter()
            .map(|p| ShortRecipePart { color: p.color, parts: p.parts })
            .collect();
        Ok(DrinkShort { id: self.id, title: self.title.clone(), recipe })
    }

    pub fn long(&self) -> Result<DrinkLong, errors::ModelError> {
        Ok(DrinkLong { id: self.id, title: self.title.clone(), recipe: self.recipe_parts()? })
    }
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(errors::ModelError::Validation(format!("title longer than {MAX_TITLE_LEN} characters")));
    }
    Ok(())
}

pub fn validate_recipe(parts: &[RecipePart]) -> Result<(), errors::ModelError> {
    if parts.is_empty() {
        return Err(errors::ModelError::Validation("recipe needs at least one part".into()));
    }
    if parts.iter().any(|p| p.parts <= 0) {
        return Err(errors::ModelError::Validation("recipe parts must be positive".into()));
    }
    Ok(())
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn create(db: &DatabaseConnection, title: &str, recipe: &[RecipePart]) -> Result<Model, errors::ModelError> {
    validate_title(title)?;
    validate_recipe(recipe)?;
    let am = ActiveModel {
        title: Set(title.to_string()),
        recipe: Set(serde_json::to_string(recipe)?),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Replace whichever of `title` / `recipe` is given.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    title: Option<&str>,
    recipe: Option<&[RecipePart]>,
) -> Result<Model, errors::ModelError> {
    let existing = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::NotFound(format!("drink {id}")))?;
    if title.is_none() && recipe.is_none() {
        return Ok(existing);
    }
    let mut found: ActiveModel = existing.into();
    if let Some(t) = title {
        validate_title(t)?;
        found.title = Set(t.to_string());
    }
    if let Some(r) = recipe {
        validate_recipe(r)?;
        found.recipe = Set(serde_json::to_string(r)?);
    }
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Delete by id; `Ok(false)` when no row matched.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
