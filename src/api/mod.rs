//! API handlers for the Booklend REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
