pub mod admin;
pub mod auth;
pub mod directory;
pub mod timesheet;
