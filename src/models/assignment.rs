use chrono::NaiveDate;
use rusqlite::{Connection, Result, params};
use serde::Serialize;

use super::TimeLog;

#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub id: Option<i64>,
    pub title: String,
    pub course_id: i64,
    pub due_date: NaiveDate,
    pub estimated_hours: i32,
    pub status: String,
    pub color_code: String,
    /// Derived sum of time-log entries; recomputed on every read, never stored.
    pub logged_hours: f64,
}

impl Assignment {
    pub fn new(
        title: &str,
        course_id: i64,
        due_date: NaiveDate,
        estimated_hours: i32,
        color_code: &str,
    ) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            course_id,
            due_date,
            estimated_hours,
            status: "Incomplete".to_string(),
            color_code: color_code.to_string(),
            logged_hours: 0.0,
        }
    }

    pub fn save(&mut self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT INTO assignments (title, course_id, due_date, estimated_hours, status, color_code)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.title,
                self.course_id,
                self.due_date,
                self.estimated_hours,
                self.status,
                self.color_code,
            ],
        )?;
        self.id = Some(conn.last_insert_rowid());
        Ok(())
    }

    /// All assignments for a course, each with its logged hours recomputed
    /// from the time_logs table.
    pub fn find_for_course(conn: &Connection, course_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, course_id, due_date, estimated_hours, status, color_code
             FROM assignments WHERE course_id = ?1 ORDER BY id"
        )?;

        let rows = stmt.query_map(params![course_id], |row| {
            Ok(Self {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                course_id: row.get(2)?,
                due_date: row.get(3)?,
                estimated_hours: row.get(4)?,
                status: row.get(5)?,
                color_code: row.get(6)?,
                logged_hours: 0.0,
            })
        })?;

        let mut assignments: Vec<Self> = rows.collect::<Result<_>>()?;
        for assignment in &mut assignments {
            if let Some(id) = assignment.id {
                assignment.logged_hours = TimeLog::total_hours(conn, id)?;
            }
        }
        Ok(assignments)
    }

    /// Titles only, for callers that don't need full records.
    pub fn titles_for_course(conn: &Connection, course_id: i64) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT title FROM assignments WHERE course_id = ?1 ORDER BY id"
        )?;
        let rows = stmt.query_map(params![course_id], |row| row.get(0))?;
        rows.collect()
    }

    pub fn update_status(conn: &Connection, id: i64, new_status: &str) -> Result<()> {
        conn.execute(
            "UPDATE assignments SET status = ?1 WHERE id = ?2",
            params![new_status, id],
        )?;
        Ok(())
    }
}
