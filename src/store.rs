use chrono::NaiveDate;
use log::{error, warn};
use std::path::Path;

use crate::db::{migrations, Database};
use crate::error::{StoreError, MAX_HOURS_PER_ENTRY};
use crate::models::{Assignment, Course, TimeLog};

/// Handle to the tracker database. Construct one at process start and pass it
/// by reference to all callers; operations run synchronously on the caller's
/// thread and the connection is not internally synchronized. A multi-threaded
/// host should wrap the store in its own mutex.
pub struct Store {
    db: Database,
}

impl Store {
    /// Open (creating if absent) the database at `path` and ensure the schema
    /// exists. Safe to call against an already-initialized file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::open(path).map_err(|e| {
            error!("Failed to open database at {}: {}", path.display(), e);
            e
        })?;
        migrations::run(db.connection()).map_err(|e| {
            error!("Failed to initialize schema: {}", e);
            e
        })?;
        Ok(Self { db })
    }

    /// Open the database at its default per-user location.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&crate::default_db_path())
    }

    pub fn add_course(&self, name: &str) -> Result<Course, StoreError> {
        Course::create(self.db.connection(), name).map_err(|e| {
            error!("Failed to add course {:?}: {}", name, e);
            e.into()
        })
    }

    /// All course names in insertion order. Duplicates appear as often as
    /// they were inserted; nothing deduplicates course names.
    pub fn course_names(&self) -> Result<Vec<String>, StoreError> {
        Course::all_names(self.db.connection()).map_err(|e| {
            error!("Failed to fetch course names: {}", e);
            e.into()
        })
    }

    /// Insert an assignment under the course with the given name. The course
    /// is resolved by exact match, first row wins; if no course matches, no
    /// row is inserted and `Ok(None)` is returned. Status starts as
    /// "Incomplete".
    pub fn add_assignment(
        &self,
        title: &str,
        course_name: &str,
        due_date: NaiveDate,
        estimated_hours: i32,
        color_code: &str,
    ) -> Result<Option<Assignment>, StoreError> {
        let conn = self.db.connection();

        let course = match Course::find_by_name(conn, course_name).map_err(|e| {
            error!("Failed to resolve course {:?}: {}", course_name, e);
            StoreError::from(e)
        })? {
            Some(course) => course,
            None => {
                warn!(
                    "No course named {:?}; assignment {:?} not added",
                    course_name, title
                );
                return Ok(None);
            }
        };

        let mut assignment =
            Assignment::new(title, course.id, due_date, estimated_hours, color_code);
        assignment.save(conn).map_err(|e| {
            error!("Failed to add assignment {:?}: {}", title, e);
            StoreError::from(e)
        })?;
        Ok(Some(assignment))
    }

    /// Insert an assignment addressed by course id. Course existence is not
    /// checked; the schema does not enforce the foreign key.
    pub fn add_assignment_to_course_id(
        &self,
        title: &str,
        course_id: i64,
        due_date: NaiveDate,
        estimated_hours: i32,
        color_code: &str,
    ) -> Result<Assignment, StoreError> {
        let mut assignment =
            Assignment::new(title, course_id, due_date, estimated_hours, color_code);
        assignment.save(self.db.connection()).map_err(|e| {
            error!("Failed to add assignment {:?}: {}", title, e);
            StoreError::from(e)
        })?;
        Ok(assignment)
    }

    /// Assignments for the course with the given name, each carrying its
    /// logged hours recomputed from the time_logs table. An unknown course
    /// name yields an empty vec, same as a course with no assignments.
    pub fn assignments_for_course(
        &self,
        course_name: &str,
    ) -> Result<Vec<Assignment>, StoreError> {
        let conn = self.db.connection();

        let course = match Course::find_by_name(conn, course_name).map_err(|e| {
            error!("Failed to resolve course {:?}: {}", course_name, e);
            StoreError::from(e)
        })? {
            Some(course) => course,
            None => return Ok(Vec::new()),
        };

        Assignment::find_for_course(conn, course.id).map_err(|e| {
            error!("Failed to load assignments for {:?}: {}", course_name, e);
            e.into()
        })
    }

    /// Assignment titles for a course id, without the derived fields.
    pub fn assignment_titles_for_course_id(
        &self,
        course_id: i64,
    ) -> Result<Vec<String>, StoreError> {
        Assignment::titles_for_course(self.db.connection(), course_id).map_err(|e| {
            error!("Failed to load assignment titles: {}", e);
            e.into()
        })
    }

    /// Append a time-log entry. A single entry may record at most 1.0 hour;
    /// anything over is rejected before touching storage.
    pub fn log_time(
        &self,
        assignment_id: i64,
        date: NaiveDate,
        hours: f64,
    ) -> Result<TimeLog, StoreError> {
        if hours > MAX_HOURS_PER_ENTRY {
            warn!(
                "Rejected time log of {} hours for assignment {}",
                hours, assignment_id
            );
            return Err(StoreError::HourCapExceeded { hours });
        }

        let mut entry = TimeLog::new(assignment_id, date, hours);
        entry.save(self.db.connection()).map_err(|e| {
            error!("Failed to log time for assignment {}: {}", assignment_id, e);
            StoreError::from(e)
        })?;
        Ok(entry)
    }

    /// Total hours logged against an assignment; 0.0 when nothing is logged.
    pub fn logged_hours(&self, assignment_id: i64) -> Result<f64, StoreError> {
        TimeLog::total_hours(self.db.connection(), assignment_id).map_err(|e| {
            error!(
                "Failed to sum logged hours for assignment {}: {}",
                assignment_id, e
            );
            e.into()
        })
    }

    /// Set an assignment's status. The value is free-form text; no validation
    /// is applied and an unknown id updates nothing.
    pub fn update_assignment_status(
        &self,
        assignment_id: i64,
        new_status: &str,
    ) -> Result<(), StoreError> {
        Assignment::update_status(self.db.connection(), assignment_id, new_status).map_err(|e| {
            error!(
                "Failed to update status for assignment {}: {}",
                assignment_id, e
            );
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn setup_store() -> (Store, TempDir) {
        let dir = tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.db")).unwrap();
        (store, dir)
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[test]
    fn test_add_course_then_names_includes_it() {
        let (store, _dir) = setup_store();

        let before = store.course_names().unwrap();
        store.add_course("Math").unwrap();
        let after = store.course_names().unwrap();

        assert_eq!(
            after.iter().filter(|n| *n == "Math").count(),
            before.iter().filter(|n| *n == "Math").count() + 1
        );
    }

    #[test]
    fn test_open_twice_over_same_file_keeps_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let store = Store::open(&path).unwrap();
            store.add_course("Math").unwrap();
        }

        let store = Store::open(&path).unwrap();
        assert_eq!(store.course_names().unwrap(), vec!["Math"]);
    }

    #[test]
    fn test_add_assignment_unknown_course_is_noop() {
        let (store, _dir) = setup_store();

        let added = store
            .add_assignment("Essay", "Nope", day(), 3, "blue")
            .unwrap();
        assert!(added.is_none());
        assert!(store.assignments_for_course("Nope").unwrap().is_empty());
    }

    #[test]
    fn test_add_assignment_duplicate_course_goes_to_first() {
        let (store, _dir) = setup_store();

        let first = store.add_course("Math").unwrap();
        store.add_course("Math").unwrap();

        let added = store
            .add_assignment("Essay", "Math", day(), 3, "blue")
            .unwrap()
            .unwrap();
        assert_eq!(added.course_id, first.id);
    }

    #[test]
    fn test_log_time_boundary() {
        let (store, _dir) = setup_store();
        store.add_course("Math").unwrap();
        let assignment = store
            .add_assignment("Essay", "Math", day(), 3, "blue")
            .unwrap()
            .unwrap();
        let id = assignment.id.unwrap();

        // 1.0 is the inclusive cap
        store.log_time(id, day(), 1.0).unwrap();
        assert_eq!(store.logged_hours(id).unwrap(), 1.0);

        let err = store.log_time(id, day(), 1.01).unwrap_err();
        assert!(matches!(err, StoreError::HourCapExceeded { .. }));
        assert_eq!(store.logged_hours(id).unwrap(), 1.0);
    }

    #[test]
    fn test_rejected_log_leaves_no_row() {
        let (store, _dir) = setup_store();
        store.add_course("Math").unwrap();
        let assignment = store
            .add_assignment("Essay", "Math", day(), 3, "blue")
            .unwrap()
            .unwrap();
        let id = assignment.id.unwrap();

        assert!(store.log_time(id, day(), 1.5).is_err());
        assert_eq!(store.logged_hours(id).unwrap(), 0.0);
    }

    #[test]
    fn test_logged_hours_accumulate_per_assignment() {
        let (store, _dir) = setup_store();
        store.add_course("Math").unwrap();
        let assignment = store
            .add_assignment("Essay", "Math", day(), 3, "blue")
            .unwrap()
            .unwrap();
        let id = assignment.id.unwrap();

        store.log_time(id, day(), 0.25).unwrap();
        store.log_time(id, day(), 0.50).unwrap();

        let assignments = store.assignments_for_course("Math").unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].title, "Essay");
        assert_eq!(assignments[0].estimated_hours, 3);
        assert_eq!(assignments[0].logged_hours, 0.75);
    }

    #[test]
    fn test_update_assignment_status() {
        let (store, _dir) = setup_store();
        store.add_course("Math").unwrap();
        let assignment = store
            .add_assignment("Essay", "Math", day(), 3, "blue")
            .unwrap()
            .unwrap();

        store
            .update_assignment_status(assignment.id.unwrap(), "Done")
            .unwrap();

        let assignments = store.assignments_for_course("Math").unwrap();
        assert_eq!(assignments[0].status, "Done");
    }

    #[test]
    fn test_id_addressed_insert_skips_course_check() {
        let (store, _dir) = setup_store();

        // No course row 42 exists; the schema does not enforce the FK
        store
            .add_assignment_to_course_id("Orphan", 42, day(), 1, "blue")
            .unwrap();

        let titles = store.assignment_titles_for_course_id(42).unwrap();
        assert_eq!(titles, vec!["Orphan"]);
    }
}
