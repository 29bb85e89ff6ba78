//! SQLite persistence for todos and conversion history.
//!
//! # Design
//! All DDL lives in one `SCHEMA_SQL` constant using `IF NOT EXISTS`
//! throughout, so `apply_schema` is idempotent and runs unconditionally at
//! startup. Query functions take `&Connection` and return `rusqlite::Result`;
//! the HTTP layer owns the `Mutex<Connection>` and the error mapping.
//! Timestamps are stored as fixed-width RFC 3339 text (microseconds, UTC) so
//! lexicographic `ORDER BY created_at` is chronological.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::models::{ConversionHistory, Todo};

/// Complete DDL for the backend database.
const SCHEMA_SQL: &str = r#"
-- WAL mode allows reads concurrent with the single writer.
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS todos (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT,
    completed   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);
CREATE INDEX IF NOT EXISTS idx_todos_completed  ON todos(completed);

CREATE TABLE IF NOT EXISTS conversion_history (
    id         TEXT PRIMARY KEY,
    value      REAL NOT NULL,
    from_unit  TEXT NOT NULL,
    to_unit    TEXT NOT NULL,
    result     REAL NOT NULL,
    unit_type  TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_history_created_at ON conversion_history(created_at);
"#;

/// Open (or create) the database file and apply the schema.
pub fn open(path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// In-memory database with the schema applied, for tests.
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// Idempotent schema application.
pub fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

fn to_stamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_stamp(raw: &str, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_id(raw: &str, idx: usize) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// --- todos ---

const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let id: String = row.get(0)?;
    let created: String = row.get(4)?;
    let updated: String = row.get(5)?;
    Ok(Todo {
        id: parse_id(&id, 0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        created_at: parse_stamp(&created, 4)?,
        updated_at: parse_stamp(&updated, 5)?,
    })
}

pub fn insert_todo(conn: &Connection, todo: &Todo) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO todos (id, title, description, completed, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            todo.id.to_string(),
            todo.title,
            todo.description,
            todo.completed,
            to_stamp(todo.created_at),
            to_stamp(todo.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_todo(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Todo>> {
    conn.query_row(
        &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
        params![id.to_string()],
        row_to_todo,
    )
    .map(Some)
    .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(other),
    })
}

/// Page of todos newest-first, plus the total matching count.
pub fn list_todos(
    conn: &Connection,
    completed: Option<bool>,
    offset: i64,
    limit: i64,
) -> rusqlite::Result<(Vec<Todo>, i64)> {
    match completed {
        Some(flag) => {
            let total = conn.query_row(
                "SELECT COUNT(*) FROM todos WHERE completed = ?1",
                params![flag],
                |row| row.get(0),
            )?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {TODO_COLUMNS} FROM todos WHERE completed = ?1
                 ORDER BY created_at DESC, id LIMIT ?2 OFFSET ?3"
            ))?;
            let todos = stmt
                .query_map(params![flag, limit, offset], row_to_todo)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok((todos, total))
        }
        None => {
            let total = conn.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {TODO_COLUMNS} FROM todos
                 ORDER BY created_at DESC, id LIMIT ?1 OFFSET ?2"
            ))?;
            let todos = stmt
                .query_map(params![limit, offset], row_to_todo)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok((todos, total))
        }
    }
}

/// Write back every mutable column of an existing todo.
pub fn update_todo(conn: &Connection, todo: &Todo) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE todos SET title = ?2, description = ?3, completed = ?4, updated_at = ?5
         WHERE id = ?1",
        params![
            todo.id.to_string(),
            todo.title,
            todo.description,
            todo.completed,
            to_stamp(todo.updated_at),
        ],
    )?;
    Ok(())
}

/// Returns whether a row was actually deleted.
pub fn delete_todo(conn: &Connection, id: Uuid) -> rusqlite::Result<bool> {
    let changed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id.to_string()])?;
    Ok(changed > 0)
}

// --- conversion history ---

const HISTORY_COLUMNS: &str = "id, value, from_unit, to_unit, result, unit_type, created_at";

fn row_to_history(row: &Row<'_>) -> rusqlite::Result<ConversionHistory> {
    let id: String = row.get(0)?;
    let created: String = row.get(6)?;
    Ok(ConversionHistory {
        id: parse_id(&id, 0)?,
        value: row.get(1)?,
        from_unit: row.get(2)?,
        to_unit: row.get(3)?,
        result: row.get(4)?,
        unit_type: row.get(5)?,
        created_at: parse_stamp(&created, 6)?,
    })
}

pub fn insert_history(conn: &Connection, record: &ConversionHistory) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO conversion_history (id, value, from_unit, to_unit, result, unit_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id.to_string(),
            record.value,
            record.from_unit,
            record.to_unit,
            record.result,
            record.unit_type,
            to_stamp(record.created_at),
        ],
    )?;
    Ok(())
}

/// Page of history records newest-first, plus the total count.
pub fn list_history(
    conn: &Connection,
    offset: i64,
    limit: i64,
) -> rusqlite::Result<(Vec<ConversionHistory>, i64)> {
    let total = conn.query_row("SELECT COUNT(*) FROM conversion_history", [], |row| row.get(0))?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {HISTORY_COLUMNS} FROM conversion_history
         ORDER BY created_at DESC, id LIMIT ?1 OFFSET ?2"
    ))?;
    let records = stmt
        .query_map(params![limit, offset], row_to_history)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok((records, total))
}

/// Returns whether a record was actually deleted.
pub fn delete_history(conn: &Connection, id: Uuid) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "DELETE FROM conversion_history WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(changed > 0)
}

/// Delete all history records, returning how many were removed.
pub fn clear_history(conn: &Connection) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM conversion_history", [])
}
