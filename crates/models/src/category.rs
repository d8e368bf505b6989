use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{errors, question};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Question }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Question => Entity::has_many(question::Entity).into(),
        }
    }
}

impl Related<question::Entity> for Entity {
    fn to() -> RelationDef { Relation::Question.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// How a list of category labels should be ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelOrder { ById, ByType }

/// All category labels (`type` values) in the requested order.
pub async fn labels(db: &DatabaseConnection, order: LabelOrder) -> Result<Vec<String>, errors::ModelError> {
    let finder = match order {
        LabelOrder::ById => Entity::find().order_by_asc(Column::Id),
        LabelOrder::ByType => Entity::find().order_by_asc(Column::Kind),
    };
    let rows = finder.all(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(|c| c.kind).collect())
}
