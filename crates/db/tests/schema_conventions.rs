//! Schema convention checks against the migrated database.
//!
//! The error classifier keys 409s off `uq_`-prefixed constraint names, so
//! the naming convention is load-bearing, not cosmetic.

use sqlx::PgPool;

/// Every id column is bigint (BIGSERIAL keys throughout).
#[sqlx::test(migrations = "./migrations")]
async fn all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Every table carries timestamptz created_at / updated_at columns.
#[sqlx::test(migrations = "./migrations")]
async fn all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let found: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) = found.unwrap_or_else(|| panic!("Table {table} missing {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz"
            );
        }
    }
}

/// Unique constraints all follow the `uq_` prefix the 409 classifier
/// depends on.
#[sqlx::test(migrations = "./migrations")]
async fn unique_constraints_use_uq_prefix(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, constraint_name
         FROM information_schema.table_constraints
         WHERE constraint_type = 'UNIQUE'
           AND table_schema = 'public'
         ORDER BY table_name, constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<&str> = rows.iter().map(|(_, c)| c.as_str()).collect();
    assert!(names.contains(&"uq_users_email"));
    assert!(names.contains(&"uq_departments_name"));
    assert!(names.contains(&"uq_projects_name"));
    assert!(names.contains(&"uq_timesheet_entries_email_week_project"));

    for (table, constraint) in &rows {
        assert!(
            constraint.starts_with("uq_"),
            "Unique constraint {constraint} on {table} should be uq_-prefixed"
        );
    }
}

/// The seed migration provides the default department and the three
/// always-available projects.
#[sqlx::test(migrations = "./migrations")]
async fn default_projects_are_seeded(pool: PgPool) {
    let (departments,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM departments WHERE name = 'general'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(departments, 1);

    let projects: Vec<(String, String)> = sqlx::query_as(
        "SELECT name, department FROM projects ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let expected = ["Company Event", "Company Holiday", "PTO"];
    assert_eq!(projects.len(), expected.len());
    for ((name, department), want) in projects.iter().zip(expected) {
        assert_eq!(name, want);
        assert_eq!(department, "general");
    }
}
