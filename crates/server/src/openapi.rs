use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use serde::Serialize;
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub success: bool, pub error: u16, pub message: String }

#[derive(ToSchema)]
pub struct QuestionDoc { pub id: i32, pub question: String, pub answer: String, pub category: i32, pub difficulty: i32 }

/// Either `{searchTerm}` or the four fields of a new question.
#[derive(Serialize, ToSchema)]
pub struct QuestionsRequestDoc {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i32>,
    pub difficulty: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct QuizCategoryDoc {
    pub id: i32,
    /// `click` selects every category.
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(ToSchema)]
pub struct QuizRequestDoc { pub previous_questions: Vec<i32>, pub quiz_category: QuizCategoryDoc }

#[derive(ToSchema)]
pub struct RecipePartDoc { pub color: String, pub name: String, pub parts: i32 }

#[derive(ToSchema)]
pub struct DrinkDoc { pub title: String, pub recipe: Vec<RecipePartDoc> }

#[derive(ToSchema)]
pub struct DrinkPatchDoc { pub title: Option<String>, pub recipe: Option<Vec<RecipePartDoc>> }

pub struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::trivia::list_categories,
        crate::routes::trivia::list_questions,
        crate::routes::trivia::post_questions,
        crate::routes::trivia::delete_question,
        crate::routes::trivia::category_questions,
        crate::routes::trivia::play_quiz,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            QuestionDoc,
            QuestionsRequestDoc,
            QuizCategoryDoc,
            QuizRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "trivia")
    )
)]
pub struct TriviaApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::drinks::list_drinks,
        crate::routes::drinks::drinks_detail,
        crate::routes::drinks::create_drink,
        crate::routes::drinks::update_drink,
        crate::routes::drinks::delete_drink,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            RecipePartDoc,
            DrinkDoc,
            DrinkPatchDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "drinks")
    )
)]
pub struct CoffeeApiDoc;
