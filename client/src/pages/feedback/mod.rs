pub mod repository;
pub mod utils;
pub mod view_model;

pub use utils::FeedbackDraft;
pub use view_model::{FeedbackOutcome, FeedbackViewModel};
