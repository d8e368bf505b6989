use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait};
use serde::{Deserialize, Serialize};

use crate::{category, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::Category)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields of a question that does not exist yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

pub fn validate(new: &NewQuestion) -> Result<(), errors::ModelError> {
    if new.question.trim().is_empty() {
        return Err(errors::ModelError::Validation("question text required".into()));
    }
    if new.answer.trim().is_empty() {
        return Err(errors::ModelError::Validation("answer text required".into()));
    }
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&new.difficulty) {
        return Err(errors::ModelError::Validation(format!(
            "difficulty must be within {MIN_DIFFICULTY}..={MAX_DIFFICULTY}"
        )));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewQuestion) -> Result<Model, errors::ModelError> {
    validate(&new)?;
    let am = ActiveModel {
        question: Set(new.question),
        answer: Set(new.answer),
        category: Set(new.category),
        difficulty: Set(new.difficulty),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Delete by id; `Ok(false)` when no row matched.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
