//! SQL query constants.
//!
//! All queries use SQLite `?` placeholders. The site runs against a single
//! embedded SQLite file, so there is no second backend to abstract over.

pub const INSERT_USER: &str = "INSERT INTO users (username, password_hash) VALUES (?, ?)";

pub const SELECT_USER: &str = "SELECT username, password_hash FROM users WHERE username = ?";

pub const UPDATE_USER_PASSWORD: &str = "UPDATE users SET password_hash = ? WHERE username = ?";

pub const INSERT_SESSION: &str = r#"
    INSERT INTO sessions (session_id, username, created_at, expires_at)
    VALUES (?, ?, ?, ?)
"#;

pub const SELECT_SESSION: &str =
    "SELECT session_id, username, created_at, expires_at FROM sessions WHERE session_id = ?";

pub const DELETE_SESSION: &str = "DELETE FROM sessions WHERE session_id = ?";

pub const DELETE_EXPIRED_SESSIONS: &str = "DELETE FROM sessions WHERE expires_at < ?";

pub const SELECT_ALL_CONTENT: &str =
    "SELECT id, section, title, content, image_path FROM content ORDER BY id";

pub const SELECT_CONTENT_BY_ID: &str =
    "SELECT id, section, title, content, image_path FROM content WHERE id = ?";

pub const SELECT_CONTENT_BY_SECTION: &str = "SELECT id FROM content WHERE section = ? LIMIT 1";

pub const SELECT_CONTENT_BY_SECTION_AND_TITLE: &str =
    "SELECT id FROM content WHERE section = ? AND title = ? LIMIT 1";

pub const INSERT_CONTENT: &str = r#"
    INSERT INTO content (section, title, content, image_path)
    VALUES (?, ?, ?, ?)
"#;

pub const UPDATE_CONTENT_TEXT: &str = "UPDATE content SET title = ?, content = ? WHERE id = ?";

pub const UPDATE_CONTENT_IMAGE: &str = "UPDATE content SET image_path = ? WHERE id = ?";
