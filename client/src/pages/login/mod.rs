pub mod repository;
pub mod utils;
pub mod view_model;

pub use utils::{validate_credentials, LoginForm};
pub use view_model::LoginViewModel;
