pub mod attendance;
pub mod feedback;
pub mod login;
pub mod quiz;
pub mod schedule;
