//! SQL DDL for initializing the database schema.

/// SQLite schema includes:
/// - `page` table (one row per page, `path` unique)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS page (
    id INTEGER PRIMARY KEY NOT NULL,
    page_name TEXT NOT NULL,
    path TEXT NOT NULL UNIQUE,
    template_file TEXT NOT NULL,
    title TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);
"#;
