//! Service layer for the trivia and coffee-shop APIs.
//! - Listing/search with fixed-size pages and the quiz selector for trivia.
//! - Drink CRUD and the bearer-token permission guard for the coffee shop.
//! - Everything takes its `DatabaseConnection` or verifier as an argument;
//!   there is no process-wide state.

pub mod errors;
pub mod de;
pub mod pagination;
pub mod trivia;
pub mod quiz;
pub mod drinks;
pub mod auth;
#[cfg(test)]
pub mod test_support;
