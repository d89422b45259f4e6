//! Repository for the `timesheet_entries` table.
//!
//! Writes use single-statement primitives keyed on (email, week_start,
//! project) so concurrent same-key submissions cannot interleave a
//! read-then-write; last write wins, which is the reconciliation policy.

use sqlx::PgPool;

use crate::models::timesheet_entry::{
    ExportFilter, TimesheetEntry, UpsertTimesheetEntry, UpsertedTimesheetEntry,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, week_start, project, department, hours, created_at, updated_at";

/// Provides reconciliation and read operations for timesheet entries.
pub struct TimesheetRepo;

impl TimesheetRepo {
    /// Insert or overwrite the entry for (email, week_start, project) in one
    /// statement. The `inserted` column reports whether the row is new
    /// (`xmax = 0` holds only for freshly inserted tuples), so the caller
    /// can distinguish Created from Updated even under races.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertTimesheetEntry,
    ) -> Result<UpsertedTimesheetEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO timesheet_entries (email, week_start, project, department, hours)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (email, week_start, project)
             DO UPDATE SET
                hours = EXCLUDED.hours,
                department = EXCLUDED.department,
                updated_at = NOW()
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        sqlx::query_as::<_, UpsertedTimesheetEntry>(&query)
            .bind(&input.email)
            .bind(&input.week_start)
            .bind(&input.project)
            .bind(&input.department)
            .bind(&input.hours)
            .fetch_one(pool)
            .await
    }

    /// Delete the entry for (email, week_start, project), if any.
    ///
    /// Returns `true` when a row was removed -- the caller maps `true` to a
    /// Deleted outcome and `false` to a no-op.
    pub async fn delete_by_key(
        pool: &PgPool,
        email: &str,
        week_start: &str,
        project: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM timesheet_entries
             WHERE email = $1 AND week_start = $2 AND project = $3",
        )
        .bind(email)
        .bind(week_start)
        .bind(project)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the single entry for (email, week_start, project).
    pub async fn find_by_key(
        pool: &PgPool,
        email: &str,
        week_start: &str,
        project: &str,
    ) -> Result<Option<TimesheetEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timesheet_entries
             WHERE email = $1 AND week_start = $2 AND project = $3"
        );
        sqlx::query_as::<_, TimesheetEntry>(&query)
            .bind(email)
            .bind(week_start)
            .bind(project)
            .fetch_optional(pool)
            .await
    }

    /// Fetch all entries for (email, week_start) by exact string match on
    /// the week key. Both the summary path (which aligns the key first) and
    /// the copy-previous-week path (which passes the key through untouched)
    /// funnel into this query; the difference lives in the callers.
    pub async fn find_for_week(
        pool: &PgPool,
        email: &str,
        week_start: &str,
    ) -> Result<Vec<TimesheetEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timesheet_entries
             WHERE email = $1 AND week_start = $2
             ORDER BY project"
        );
        sqlx::query_as::<_, TimesheetEntry>(&query)
            .bind(email)
            .bind(week_start)
            .fetch_all(pool)
            .await
    }

    /// Fetch entries matching an export filter, sorted by project name.
    ///
    /// Department and project match case-insensitively but exactly; the week
    /// range is inclusive string comparison on the canonical key and only
    /// applies when both ends are present.
    pub async fn find_for_export(
        pool: &PgPool,
        filter: &ExportFilter,
    ) -> Result<Vec<TimesheetEntry>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = vec!["email = $1".to_string()];
        let mut bind_idx = 2u32;

        if filter.department.is_some() {
            conditions.push(format!("LOWER(department) = LOWER(${bind_idx})"));
            bind_idx += 1;
        }
        if filter.project.is_some() {
            conditions.push(format!("LOWER(project) = LOWER(${bind_idx})"));
            bind_idx += 1;
        }
        let range = filter.start.as_ref().zip(filter.end.as_ref());
        if range.is_some() {
            conditions.push(format!(
                "week_start >= ${bind_idx} AND week_start <= ${next}",
                next = bind_idx + 1
            ));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM timesheet_entries
             WHERE {conditions}
             ORDER BY project",
            conditions = conditions.join(" AND "),
        );

        let mut q = sqlx::query_as::<_, TimesheetEntry>(&query).bind(&filter.email);
        if let Some(ref department) = filter.department {
            q = q.bind(department);
        }
        if let Some(ref project) = filter.project {
            q = q.bind(project);
        }
        if let Some((start, end)) = range {
            q = q.bind(start).bind(end);
        }
        q.fetch_all(pool).await
    }
}
