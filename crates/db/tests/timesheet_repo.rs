//! Integration tests for the timesheet repository against a real database:
//! - upsert insert-vs-overwrite reporting
//! - delete-by-key semantics
//! - composite-key and seven-slot constraints
//! - export filter combinations

use cloksy_db::models::timesheet_entry::{ExportFilter, UpsertTimesheetEntry};
use cloksy_db::repositories::TimesheetRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn entry(email: &str, week_start: &str, project: &str, hours: [f64; 7]) -> UpsertTimesheetEntry {
    UpsertTimesheetEntry {
        email: email.to_string(),
        week_start: week_start.to_string(),
        project: project.to_string(),
        department: "general".to_string(),
        hours: hours.to_vec(),
    }
}

fn filter_for(email: &str) -> ExportFilter {
    ExportFilter {
        email: email.to_string(),
        department: None,
        project: None,
        start: None,
        end: None,
    }
}

// ---------------------------------------------------------------------------
// Upsert / delete
// ---------------------------------------------------------------------------

/// The first upsert for a key reports an insert; a second upsert for the
/// same key reports an overwrite and replaces hours and department in place.
#[sqlx::test(migrations = "./migrations")]
async fn upsert_reports_insert_then_overwrite(pool: PgPool) {
    let first = entry(
        "alice@example.com",
        "2024-06-03",
        "PTO",
        [8.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
    let created = TimesheetRepo::upsert(&pool, &first).await.unwrap();
    assert!(created.inserted);
    assert_eq!(created.entry.hours[0], 8.0);
    assert_eq!(created.entry.department, "general");

    let mut second = entry(
        "alice@example.com",
        "2024-06-03",
        "PTO",
        [0.0, 7.5, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
    second.department = "operations".to_string();
    let updated = TimesheetRepo::upsert(&pool, &second).await.unwrap();
    assert!(!updated.inserted);
    assert_eq!(updated.entry.id, created.entry.id);
    assert_eq!(updated.entry.hours, vec![0.0, 7.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(updated.entry.department, "operations");

    // Still a single row for the key.
    let rows = TimesheetRepo::find_for_week(&pool, "alice@example.com", "2024-06-03")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

/// Upserts for different projects in the same week coexist as separate rows.
#[sqlx::test(migrations = "./migrations")]
async fn upsert_keys_are_per_project(pool: PgPool) {
    let pto = entry(
        "alice@example.com",
        "2024-06-03",
        "PTO",
        [8.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
    let holiday = entry(
        "alice@example.com",
        "2024-06-03",
        "Company Holiday",
        [0.0, 8.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
    assert!(TimesheetRepo::upsert(&pool, &pto).await.unwrap().inserted);
    assert!(
        TimesheetRepo::upsert(&pool, &holiday)
            .await
            .unwrap()
            .inserted
    );

    let rows = TimesheetRepo::find_for_week(&pool, "alice@example.com", "2024-06-03")
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    // Ordered by project.
    assert_eq!(rows[0].project, "Company Holiday");
    assert_eq!(rows[1].project, "PTO");
}

/// Deleting reports whether a row actually existed, so a caller can tell a
/// removal from a no-op.
#[sqlx::test(migrations = "./migrations")]
async fn delete_by_key_reports_whether_a_row_existed(pool: PgPool) {
    let deleted = TimesheetRepo::delete_by_key(&pool, "alice@example.com", "2024-06-03", "PTO")
        .await
        .unwrap();
    assert!(!deleted, "nothing stored yet");

    let input = entry(
        "alice@example.com",
        "2024-06-03",
        "PTO",
        [8.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
    TimesheetRepo::upsert(&pool, &input).await.unwrap();

    let deleted = TimesheetRepo::delete_by_key(&pool, "alice@example.com", "2024-06-03", "PTO")
        .await
        .unwrap();
    assert!(deleted);

    let again = TimesheetRepo::delete_by_key(&pool, "alice@example.com", "2024-06-03", "PTO")
        .await
        .unwrap();
    assert!(!again, "second delete finds nothing");

    let found = TimesheetRepo::find_by_key(&pool, "alice@example.com", "2024-06-03", "PTO")
        .await
        .unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// A plain INSERT that bypasses the upsert is rejected by the composite
/// unique key.
#[sqlx::test(migrations = "./migrations")]
async fn duplicate_composite_key_rejected(pool: PgPool) {
    let insert = "INSERT INTO timesheet_entries (email, week_start, project, department, hours)
                  VALUES ($1, $2, $3, $4, $5)";
    let hours = vec![8.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

    sqlx::query(insert)
        .bind("alice@example.com")
        .bind("2024-06-03")
        .bind("PTO")
        .bind("general")
        .bind(&hours)
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query(insert)
        .bind("alice@example.com")
        .bind("2024-06-03")
        .bind("PTO")
        .bind("general")
        .bind(&hours)
        .execute(&pool)
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(
                db_err.constraint(),
                Some("uq_timesheet_entries_email_week_project")
            );
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

/// The schema rejects hour arrays that are not exactly seven slots.
#[sqlx::test(migrations = "./migrations")]
async fn hours_must_have_seven_slots(pool: PgPool) {
    let insert = "INSERT INTO timesheet_entries (email, week_start, project, department, hours)
                  VALUES ($1, $2, $3, $4, $5)";

    for bad in [vec![8.0; 6], vec![8.0; 8], Vec::<f64>::new()] {
        let err = sqlx::query(insert)
            .bind("alice@example.com")
            .bind("2024-06-03")
            .bind("PTO")
            .bind("general")
            .bind(&bad)
            .execute(&pool)
            .await
            .unwrap_err();

        match err {
            sqlx::Error::Database(db_err) => {
                assert_eq!(
                    db_err.constraint(),
                    Some("ck_timesheet_entries_seven_days"),
                    "array of {} slots must violate the cardinality check",
                    bad.len()
                );
            }
            other => panic!("expected a database error, got {other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Export filters
// ---------------------------------------------------------------------------

async fn seed_export_fixture(pool: &PgPool) {
    let mut rows = vec![
        entry(
            "alice@example.com",
            "2024-06-03",
            "PTO",
            [8.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ),
        entry(
            "alice@example.com",
            "2024-06-10",
            "PTO",
            [0.0, 8.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ),
        entry(
            "alice@example.com",
            "2024-06-10",
            "Apollo",
            [4.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ),
        entry(
            "bob@example.com",
            "2024-06-03",
            "PTO",
            [8.0, 8.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ),
    ];
    rows[2].department = "engineering".to_string();

    for row in &rows {
        TimesheetRepo::upsert(pool, row).await.unwrap();
    }
}

/// The base filter scopes to the email alone.
#[sqlx::test(migrations = "./migrations")]
async fn export_filter_scopes_by_email(pool: PgPool) {
    seed_export_fixture(&pool).await;

    let rows = TimesheetRepo::find_for_export(&pool, &filter_for("alice@example.com"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.email == "alice@example.com"));
    // Sorted by project.
    assert_eq!(rows[0].project, "Apollo");

    let rows = TimesheetRepo::find_for_export(&pool, &filter_for("carol@example.com"))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

/// Project and department filters match exactly but case-insensitively.
#[sqlx::test(migrations = "./migrations")]
async fn export_filter_matches_case_insensitively(pool: PgPool) {
    seed_export_fixture(&pool).await;

    let mut filter = filter_for("alice@example.com");
    filter.project = Some("pto".to_string());
    let rows = TimesheetRepo::find_for_export(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.project == "PTO"));

    let mut filter = filter_for("alice@example.com");
    filter.department = Some("ENGINEERING".to_string());
    let rows = TimesheetRepo::find_for_export(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].project, "Apollo");

    // A prefix is not a match.
    let mut filter = filter_for("alice@example.com");
    filter.project = Some("PT".to_string());
    let rows = TimesheetRepo::find_for_export(&pool, &filter).await.unwrap();
    assert!(rows.is_empty());
}

/// The week range is an inclusive string comparison on the Monday key and
/// only applies when both ends are present.
#[sqlx::test(migrations = "./migrations")]
async fn export_filter_range_needs_both_ends(pool: PgPool) {
    seed_export_fixture(&pool).await;

    let mut filter = filter_for("alice@example.com");
    filter.start = Some("2024-06-10".to_string());
    filter.end = Some("2024-06-10".to_string());
    let rows = TimesheetRepo::find_for_export(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.week_start == "2024-06-10"));

    // A lone start (or end) is ignored rather than half-applied.
    let mut filter = filter_for("alice@example.com");
    filter.start = Some("2024-06-10".to_string());
    let rows = TimesheetRepo::find_for_export(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 3);
}

/// Filters combine: project + range narrows to the intersection.
#[sqlx::test(migrations = "./migrations")]
async fn export_filters_combine(pool: PgPool) {
    seed_export_fixture(&pool).await;

    let mut filter = filter_for("alice@example.com");
    filter.project = Some("PTO".to_string());
    filter.start = Some("2024-06-03".to_string());
    filter.end = Some("2024-06-09".to_string());
    let rows = TimesheetRepo::find_for_export(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].week_start, "2024-06-03");
    assert_eq!(rows[0].project, "PTO");
}
