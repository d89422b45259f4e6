pub mod error;
pub mod export;
pub mod timesheet;
pub mod types;
pub mod week;
