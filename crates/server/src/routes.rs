pub mod auth;
pub mod drinks;
pub mod trivia;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::auth::permissions;

use crate::errors::fallback;
use crate::openapi::{CoffeeApiDoc, TriviaApiDoc};
use crate::state::{CoffeeState, TriviaState};
use auth::{require_permission, PermissionGate};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Trivia API: categories, paginated questions, search, quiz.
pub fn build_trivia_router(state: TriviaState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/categories", get(trivia::list_categories))
        .route("/categories/:id/questions", get(trivia::category_questions))
        .route("/questions", get(trivia::list_questions).post(trivia::post_questions))
        .route("/questions/:id", delete(trivia::delete_question))
        .route("/quizzes", post(trivia::play_quiz))
        .with_state(state);

    finish(api, SwaggerUi::new("/docs").url("/api-docs/openapi.json", TriviaApiDoc::openapi()))
}

/// Coffee-shop API: public menu plus permission-gated drink management.
pub fn build_coffee_router(state: CoffeeState) -> Router {
    let gate = |permission: &'static str| from_fn_with_state(PermissionGate::new(&state.verifier, permission), require_permission);

    let api = Router::new()
        .route("/health", get(health))
        .route(
            "/drinks",
            get(drinks::list_drinks).merge(post(drinks::create_drink).route_layer(gate(permissions::POST_DRINKS))),
        )
        .route(
            "/drinks-detail",
            get(drinks::drinks_detail).route_layer(gate(permissions::GET_DRINKS_DETAIL)),
        )
        .route(
            "/drinks/:id",
            patch(drinks::update_drink)
                .route_layer(gate(permissions::PATCH_DRINKS))
                .merge(delete(drinks::delete_drink).route_layer(gate(permissions::DELETE_DRINKS))),
        )
        .with_state(state.clone());

    finish(api, SwaggerUi::new("/docs").url("/api-docs/openapi.json", CoffeeApiDoc::openapi()))
}

/// Docs, JSON 404 fallback, CORS and request tracing shared by both APIs.
fn finish(api: Router, docs: SwaggerUi) -> Router {
    api.merge(docs)
        .fallback(fallback)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
