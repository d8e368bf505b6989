use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use models::question::{self, NewQuestion};
use service::{
    pagination::PageRequest,
    quiz::{self, CategorySelector, QuizCategory},
    trivia::{self, ListingFilter, QuestionPage},
};

use crate::{errors::JsonApiError, state::TriviaState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; anything unparsable means 1.
    pub page: Option<String>,
}

impl PageQuery {
    fn request(&self) -> PageRequest { PageRequest::from_query(self.page.as_deref()) }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<question::Model>,
    pub total_questions: u64,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_category: Option<i32>,
}

impl From<QuestionPage> for QuestionsResponse {
    fn from(p: QuestionPage) -> Self {
        Self {
            success: true,
            questions: p.questions,
            total_questions: p.total_questions,
            categories: p.categories,
            current_category: p.current_category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i32,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i32,
}

/// Body of `POST /questions` when it creates a question.
#[derive(Debug, Deserialize)]
pub struct NewQuestionInput {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "service::de::lenient_i32")]
    pub category: i32,
    #[serde(deserialize_with = "service::de::lenient_i32")]
    pub difficulty: i32,
}

impl From<NewQuestionInput> for NewQuestion {
    fn from(i: NewQuestionInput) -> Self {
        NewQuestion { question: i.question, answer: i.answer, category: i.category, difficulty: i.difficulty }
    }
}

/// `POST /questions` carries two operations; a non-null `searchTerm` selects search.
#[derive(Debug)]
pub enum QuestionsRequest {
    Search(String),
    Create(NewQuestionInput),
}

impl TryFrom<Value> for QuestionsRequest {
    type Error = JsonApiError;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        if let Some(term) = body.get("searchTerm").filter(|t| !t.is_null()) {
            return match term {
                Value::String(s) => Ok(QuestionsRequest::Search(s.clone())),
                _ => Err(JsonApiError::unprocessable("searchTerm must be a string")),
            };
        }
        serde_json::from_value(body)
            .map(QuestionsRequest::Create)
            .map_err(|e| JsonApiError::unprocessable(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i32>,
    pub quiz_category: QuizCategory,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub quiz_category: QuizCategory,
    /// Absent once every eligible question has been played.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<question::Model>,
}

#[utoipa::path(
    get, path = "/categories", tag = "trivia",
    responses(
        (status = 200, description = "Category labels"),
        (status = 404, description = "No categories")
    )
)]
pub async fn list_categories(State(state): State<TriviaState>) -> Result<Json<CategoriesResponse>, JsonApiError> {
    let categories = trivia::category_labels(&state.db).await?;
    Ok(Json(CategoriesResponse { success: true, categories }))
}

#[utoipa::path(
    get, path = "/questions", tag = "trivia",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of questions"),
        (status = 404, description = "Page is empty")
    )
)]
pub async fn list_questions(
    State(state): State<TriviaState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<QuestionsResponse>, JsonApiError> {
    let page = trivia::list_questions(&state.db, ListingFilter::All, q.request()).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post, path = "/questions", tag = "trivia",
    params(PageQuery),
    request_body = crate::openapi::QuestionsRequestDoc,
    responses(
        (status = 200, description = "Search results, or the id of the created question"),
        (status = 422, description = "Unprocessable")
    )
)]
pub async fn post_questions(
    State(state): State<TriviaState>,
    Query(q): Query<PageQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let Json(body) = payload?;
    match QuestionsRequest::try_from(body)? {
        QuestionsRequest::Search(term) => {
            info!(term = %term, "question_search");
            let page = trivia::list_questions(&state.db, ListingFilter::Search(term), q.request()).await?;
            to_json(QuestionsResponse::from(page))
        }
        QuestionsRequest::Create(input) => {
            let created = trivia::create_question(&state.db, input.into())
                .await
                .map_err(JsonApiError::mutation)?;
            to_json(CreatedResponse { success: true, created: created.id })
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Json<Value>, JsonApiError> {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|e| JsonApiError::new(axum::http::StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string())))
}

#[utoipa::path(
    delete, path = "/questions/{id}", tag = "trivia",
    params(("id" = i32, Path, description = "Question id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such question"),
        (status = 422, description = "Unprocessable")
    )
)]
pub async fn delete_question(
    State(state): State<TriviaState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeletedResponse>, JsonApiError> {
    let Path(id) = id?;
    let deleted = trivia::delete_question(&state.db, id).await.map_err(JsonApiError::mutation)?;
    Ok(Json(DeletedResponse { success: true, deleted }))
}

#[utoipa::path(
    get, path = "/categories/{id}/questions", tag = "trivia",
    params(("id" = i32, Path, description = "Category id"), PageQuery),
    responses((status = 200, description = "Questions of the category"))
)]
pub async fn category_questions(
    State(state): State<TriviaState>,
    id: Result<Path<i32>, PathRejection>,
    Query(q): Query<PageQuery>,
) -> Result<Json<QuestionsResponse>, JsonApiError> {
    let Path(id) = id?;
    let page = trivia::list_questions(&state.db, ListingFilter::Category(id), q.request()).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post, path = "/quizzes", tag = "trivia",
    request_body = crate::openapi::QuizRequestDoc,
    responses(
        (status = 200, description = "Next question, omitted when the quiz is exhausted"),
        (status = 422, description = "Unprocessable")
    )
)]
pub async fn play_quiz(
    State(state): State<TriviaState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, JsonApiError> {
    let Json(req) = payload?;
    let selector = CategorySelector::from(&req.quiz_category);
    let question = quiz::next_question(&state.db, &req.previous_questions, selector)
        .await
        .map_err(JsonApiError::mutation)?;
    Ok(Json(QuizResponse { success: true, quiz_category: req.quiz_category, question }))
}
