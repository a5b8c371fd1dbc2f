use chrono::NaiveDate;
use rusqlite::{Connection, Result, params};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimeLog {
    pub id: Option<i64>,
    pub assignment_id: i64,
    pub date_logged: NaiveDate,
    pub hours_logged: f64,
}

impl TimeLog {
    pub fn new(assignment_id: i64, date_logged: NaiveDate, hours_logged: f64) -> Self {
        Self {
            id: None,
            assignment_id,
            date_logged,
            hours_logged,
        }
    }

    pub fn save(&mut self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT INTO time_logs (assignment_id, date_logged, hours_logged)
             VALUES (?1, ?2, ?3)",
            params![self.assignment_id, self.date_logged, self.hours_logged],
        )?;
        self.id = Some(conn.last_insert_rowid());
        Ok(())
    }

    /// Sum of hours logged against an assignment. 0.0 when nothing is logged.
    pub fn total_hours(conn: &Connection, assignment_id: i64) -> Result<f64> {
        conn.query_row(
            "SELECT COALESCE(SUM(hours_logged), 0.0) FROM time_logs WHERE assignment_id = ?1",
            params![assignment_id],
            |row| row.get(0),
        )
    }
}
