/// Responses reference their survey by id only; deleting a survey does not
/// cascade.
pub fn migration() -> String {
    r#"
CREATE TABLE survey_responses (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    survey_id TEXT NOT NULL,
    data TEXT NOT NULL,
    submitted_at TEXT NOT NULL
);

CREATE INDEX idx_survey_responses_survey
    ON survey_responses(survey_id, seq);
"#
    .to_string()
}
