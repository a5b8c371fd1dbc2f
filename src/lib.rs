pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use error::StoreError;
pub use models::{Assignment, Course, TimeLog};
pub use store::Store;

use directories::ProjectDirs;
use std::path::PathBuf;

/// Default location of the tracker database, inside the per-user data
/// directory. The directory is created if missing.
pub fn default_db_path() -> PathBuf {
    let proj_dirs = ProjectDirs::from("com", "studytrack", "StudyTrack")
        .expect("Could not determine project directories");
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir).expect("Could not create data directory");
    data_dir.join("studytrack.db")
}
