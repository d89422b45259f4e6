/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Number of daily hour slots per timesheet entry (Monday through Sunday).
pub const DAYS_PER_WEEK: usize = 7;
