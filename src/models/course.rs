use rusqlite::{Connection, Result, params};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

impl Course {
    pub fn create(conn: &Connection, name: &str) -> Result<Self> {
        conn.execute("INSERT INTO courses (name) VALUES (?1)", params![name])?;
        let id = conn.last_insert_rowid();
        Ok(Self { id, name: name.to_string() })
    }

    /// Course names in insertion order.
    pub fn all_names(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT name FROM courses ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect()
    }

    /// Exact-match lookup. Names are not unique, so the lowest-id row wins;
    /// callers cannot distinguish "missing" from "ambiguous".
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, name FROM courses WHERE name = ?1 ORDER BY id LIMIT 1"
        )?;
        let mut rows = stmt.query(params![name])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self {
                id: row.get(0)?,
                name: row.get(1)?,
            }))
        } else {
            Ok(None)
        }
    }
}
