pub mod department;
pub mod project;
pub mod timesheet_entry;
pub mod user;
