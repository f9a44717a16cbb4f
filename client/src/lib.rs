pub mod api;
pub mod cli;
pub mod config;
pub mod navigation;
pub mod pages;
pub mod state;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::AppConfig;
pub use navigation::{HistoryNavigator, Navigator, Route};
pub use state::{FileTokenStore, MemoryTokenStore, ScreenScope, SessionGuard, TokenStore};
