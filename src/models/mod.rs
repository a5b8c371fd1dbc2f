pub mod course;
pub mod assignment;
pub mod time_log;

pub use course::Course;
pub use assignment::Assignment;
pub use time_log::TimeLog;
