//! Pieces shared by the trivia and coffee-shop services: log setup,
//! startup environment checks and the small response types both expose.

pub mod types;
pub mod utils;
pub mod env;
