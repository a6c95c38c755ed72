/// Surveys, one row per document. `document` holds the full survey JSON;
/// `user_id` is copied out of it for the owner index.
pub fn migration() -> String {
    r#"
CREATE TABLE surveys (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    user_id TEXT,
    document TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX idx_surveys_user
    ON surveys(user_id, seq);
"#
    .to_string()
}
