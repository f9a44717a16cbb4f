pub mod attempt;
pub mod repository;
pub mod view_model;

pub use attempt::{Advance, QuizAttempt};
pub use view_model::{QuizPhase, QuizResult, QuizStep, QuizViewModel};
