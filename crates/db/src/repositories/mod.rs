pub mod department_repo;
pub mod project_repo;
pub mod timesheet_repo;
pub mod user_repo;

pub use department_repo::DepartmentRepo;
pub use project_repo::ProjectRepo;
pub use timesheet_repo::TimesheetRepo;
pub use user_repo::UserRepo;
