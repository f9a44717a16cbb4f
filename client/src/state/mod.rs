pub mod auth;
pub mod scope;
pub mod token;

pub use auth::SessionGuard;
pub use scope::ScreenScope;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
