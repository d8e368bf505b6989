pub mod errors;
pub mod db;
pub mod category;
pub mod question;
pub mod drink;

#[cfg(test)]
mod tests;
