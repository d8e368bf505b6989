use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{info, instrument};

use models::category::{self, LabelOrder};
use models::question::{self, NewQuestion};

use crate::errors::ServiceError;
use crate::pagination::{fetch_page, PageRequest};

/// Which subset of questions a listing covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingFilter {
    /// Every question.
    All,
    /// Questions whose text contains the term, ignoring case.
    Search(String),
    /// Questions of one category.
    Category(i32),
}

impl ListingFilter {
    pub fn is_filtered(&self) -> bool { !matches!(self, ListingFilter::All) }
}

/// A page of questions with the context the trivia frontend renders next to it.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionPage {
    pub questions: Vec<question::Model>,
    pub total_questions: u64,
    pub categories: Vec<String>,
    pub current_category: Option<i32>,
}

/// Category labels ordered by id; `NotFound` when there are none.
pub async fn category_labels(db: &DatabaseConnection) -> Result<Vec<String>, ServiceError> {
    let labels = category::labels(db, LabelOrder::ById).await?;
    if labels.is_empty() {
        return Err(ServiceError::not_found("categories"));
    }
    Ok(labels)
}

/// Escape LIKE metacharacters so the term only ever matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// List one page of questions.
///
/// An unfiltered listing whose page comes back empty is `NotFound`; a
/// search or category listing returns the empty page as a success.
#[instrument(skip(db))]
pub async fn list_questions(db: &DatabaseConnection, filter: ListingFilter, page: PageRequest) -> Result<QuestionPage, ServiceError> {
    let mut select = question::Entity::find().order_by_asc(question::Column::Id);
    let mut label_order = LabelOrder::ById;
    let mut current_category = None;

    match &filter {
        ListingFilter::All => {}
        ListingFilter::Search(term) => {
            let lowered = Expr::expr(Func::lower(Expr::col((question::Entity, question::Column::Question))));
            select = select.filter(lowered.like(LikeExpr::new(like_pattern(term)).escape('\\')));
        }
        ListingFilter::Category(id) => {
            select = select.filter(question::Column::Category.eq(*id));
            label_order = LabelOrder::ByType;
            current_category = Some(*id);
        }
    }

    let page = fetch_page(db, select, page).await?;
    if page.is_empty() && !filter.is_filtered() {
        return Err(ServiceError::not_found("questions page"));
    }

    let categories = category::labels(db, label_order).await?;
    Ok(QuestionPage { questions: page.items, total_questions: page.total, categories, current_category })
}

#[instrument(skip(db, new), fields(category = new.category, difficulty = new.difficulty))]
pub async fn create_question(db: &DatabaseConnection, new: NewQuestion) -> Result<question::Model, ServiceError> {
    let created = question::create(db, new).await?;
    info!(id = created.id, "question_created");
    Ok(created)
}

/// Delete a question; `NotFound` when the id does not exist.
#[instrument(skip(db))]
pub async fn delete_question(db: &DatabaseConnection, id: i32) -> Result<i32, ServiceError> {
    if !question::delete(db, id).await? {
        return Err(ServiceError::not_found("question"));
    }
    info!(id, "question_deleted");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PAGE_SIZE;
    use crate::test_support::{seed_questions, trivia_db};
    use std::collections::HashSet;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("Title"), "%title%");
        assert_eq!(like_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }

    #[tokio::test]
    async fn pages_hold_at_most_ten_and_never_overlap() -> anyhow::Result<()> {
        let db = trivia_db().await?;
        seed_questions(&db, 1, 23, "sci").await?;

        let mut seen = HashSet::new();
        for p in 1..=3 {
            let page = list_questions(&db, ListingFilter::All, PageRequest::new(p)).await?;
            assert!(page.questions.len() as u64 <= PAGE_SIZE);
            assert_eq!(page.total_questions, 23);
            for q in &page.questions {
                assert!(seen.insert(q.id), "question {} on two pages", q.id);
            }
        }
        assert_eq!(seen.len(), 23);
        Ok(())
    }

    #[tokio::test]
    async fn unfiltered_empty_page_is_not_found() -> anyhow::Result<()> {
        let db = trivia_db().await?;
        seed_questions(&db, 1, 3, "sci").await?;
        let res = list_questions(&db, ListingFilter::All, PageRequest::new(2)).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        let res = list_questions(&db, ListingFilter::All, PageRequest::new(0)).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn filtered_empty_page_is_success() -> anyhow::Result<()> {
        let db = trivia_db().await?;
        seed_questions(&db, 1, 3, "sci").await?;

        let search = list_questions(&db, ListingFilter::Search("no such text".into()), PageRequest::default()).await?;
        assert!(search.questions.is_empty());
        assert_eq!(search.total_questions, 0);

        let by_cat = list_questions(&db, ListingFilter::Category(6), PageRequest::default()).await?;
        assert!(by_cat.questions.is_empty());
        assert_eq!(by_cat.current_category, Some(6));
        Ok(())
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() -> anyhow::Result<()> {
        let db = trivia_db().await?;
        seed_questions(&db, 1, 2, "Sci").await?;
        seed_questions(&db, 2, 2, "Art").await?;
        create_question(&db, NewQuestion { question: "What is 50% of 10?".into(), answer: "5".into(), category: 1, difficulty: 1 }).await?;

        let page = list_questions(&db, ListingFilter::Search("aRT QUEST".into()), PageRequest::default()).await?;
        assert_eq!(page.total_questions, 2);
        assert!(page.questions.iter().all(|q| q.question.starts_with("Art")));

        let literal = list_questions(&db, ListingFilter::Search("50%".into()), PageRequest::default()).await?;
        assert_eq!(literal.total_questions, 1);
        let wildcard = list_questions(&db, ListingFilter::Search("%".into()), PageRequest::default()).await?;
        assert_eq!(wildcard.total_questions, 1);
        Ok(())
    }

    #[tokio::test]
    async fn category_listing_only_returns_that_category() -> anyhow::Result<()> {
        let db = trivia_db().await?;
        seed_questions(&db, 3, 4, "geo").await?;
        seed_questions(&db, 4, 5, "hist").await?;

        let page = list_questions(&db, ListingFilter::Category(4), PageRequest::default()).await?;
        assert_eq!(page.total_questions, 5);
        assert!(page.questions.iter().all(|q| q.category == 4));

        let mut sorted = page.categories.clone();
        sorted.sort();
        assert_eq!(page.categories, sorted);
        Ok(())
    }

    #[tokio::test]
    async fn deleted_question_leaves_the_listing() -> anyhow::Result<()> {
        let db = trivia_db().await?;
        let ids = seed_questions(&db, 1, 5, "sci").await?;

        assert_eq!(delete_question(&db, ids[2]).await?, ids[2]);
        let page = list_questions(&db, ListingFilter::All, PageRequest::default()).await?;
        assert!(page.questions.iter().all(|q| q.id != ids[2]));
        assert_eq!(page.total_questions, 4);

        assert!(matches!(delete_question(&db, ids[2]).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn category_labels_list_seeded_categories() -> anyhow::Result<()> {
        let db = trivia_db().await?;
        let labels = category_labels(&db).await?;
        assert_eq!(labels.first().map(String::as_str), Some("Science"));
        assert_eq!(labels.len(), 6);
        Ok(())
    }
}
