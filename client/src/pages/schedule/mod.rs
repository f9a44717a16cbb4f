pub mod repository;
pub mod utils;
pub mod view_model;

pub use utils::{DayEntry, DayGroups};
pub use view_model::ScheduleViewModel;
