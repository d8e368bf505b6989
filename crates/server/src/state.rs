use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::TokenVerifier;

/// Handles the trivia handlers need; built once at startup.
#[derive(Clone)]
pub struct TriviaState {
    pub db: DatabaseConnection,
}

#[derive(Clone)]
pub struct CoffeeState {
    pub db: DatabaseConnection,
    pub verifier: Arc<TokenVerifier>,
}
