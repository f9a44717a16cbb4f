mod auth;
pub mod client;
mod lessons;
mod quizzes;
pub mod types;

pub use client::*;
pub use types::*;
