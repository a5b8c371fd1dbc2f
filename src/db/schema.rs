pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS assignments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    course_id INTEGER NOT NULL,
    due_date DATE NOT NULL,
    estimated_hours INTEGER NOT NULL,
    status TEXT NOT NULL,
    color_code TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS time_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    assignment_id INTEGER NOT NULL,
    date_logged DATE NOT NULL,
    hours_logged REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS user_preferences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dark_mode INTEGER NOT NULL DEFAULT 0,
    auto_suggestions INTEGER NOT NULL DEFAULT 1,
    reminders INTEGER NOT NULL DEFAULT 1,
    week_start_day TEXT NOT NULL DEFAULT 'Wednesday'
);
"#;
