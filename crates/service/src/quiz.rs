//! Quiz question selection: one random question the player has not seen yet.

use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use models::question;

use crate::errors::ServiceError;

/// Category `type` the frontend sends when the player picked "all categories".
pub const ANY_CATEGORY: &str = "click";

/// `quiz_category` as sent by the client and echoed back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "crate::de::lenient_i32")]
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Which questions the quiz may draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategorySelector {
    Any,
    Category(i32),
}

impl From<&QuizCategory> for CategorySelector {
    fn from(c: &QuizCategory) -> Self {
        if c.kind == ANY_CATEGORY { CategorySelector::Any } else { CategorySelector::Category(c.id) }
    }
}

impl CategorySelector {
    pub fn admits(self, q: &question::Model) -> bool {
        match self {
            CategorySelector::Any => true,
            CategorySelector::Category(id) => q.category == id,
        }
    }
}

/// Pick uniformly among `candidates` that are unseen and admitted by `selector`.
///
/// `None` means the quiz is exhausted for this selector.
pub fn pick_question<'a, R: Rng + ?Sized>(
    candidates: &'a [question::Model],
    seen: &HashSet<i32>,
    selector: CategorySelector,
    rng: &mut R,
) -> Option<&'a question::Model> {
    let eligible: Vec<&question::Model> = candidates
        .iter()
        .filter(|q| !seen.contains(&q.id) && selector.admits(q))
        .collect();
    eligible.choose(rng).copied()
}

/// Next quiz question for a player who has already seen `previous`.
#[instrument(skip(db, previous), fields(seen = previous.len()))]
pub async fn next_question(
    db: &DatabaseConnection,
    previous: &[i32],
    selector: CategorySelector,
) -> Result<Option<question::Model>, ServiceError> {
    let mut select = question::Entity::find();
    if !previous.is_empty() {
        select = select.filter(question::Column::Id.is_not_in(previous.iter().copied()));
    }
    if let CategorySelector::Category(id) = selector {
        select = select.filter(question::Column::Category.eq(id));
    }
    let candidates = select.all(db).await?;

    let seen: HashSet<i32> = previous.iter().copied().collect();
    let picked = pick_question(&candidates, &seen, selector, &mut rand::thread_rng()).cloned();
    debug!(candidates = candidates.len(), picked = ?picked.as_ref().map(|q| q.id), "quiz_pick");
    Ok(picked)
}
