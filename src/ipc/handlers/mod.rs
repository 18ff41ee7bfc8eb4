pub mod attendance;
pub mod auth;
pub mod backup_exchange;
pub mod classes;
pub mod core;
pub mod holidays;
pub mod institute;
pub mod students;
