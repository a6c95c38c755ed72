use crate::storage::migrations::run_migrations;
use crate::DbConnection;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use shared_types::{ResponseData, ResponseDraft, Survey, SurveyDraft, SurveyResponse};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use survey_engine::storage::new_document_id;
use survey_engine::{ResponseFilter, StorageError, SurveyStorage};

/// One row per survey and one row per response. Writes go through a single
/// connection lock, so concurrent updates to the same survey serialise.
pub struct SqliteSurveyStorage {
    connection: DbConnection,
}

type ResponseRow = (String, String, String, String);

impl SqliteSurveyStorage {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    /// Opens (creating if needed) the database file and applies migrations.
    pub fn open(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        Self::migrated(conn)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(mut conn: Connection) -> anyhow::Result<Self> {
        run_migrations(&mut conn)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.connection
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
    }

    /// Inserts `survey` as-is, replacing any stored survey with the same id.
    pub fn upsert_survey(&self, survey: &Survey) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let document = serde_json::to_string(survey)?;

        conn.execute(
            r#"
            INSERT INTO surveys (id, user_id, document, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                document = excluded.document,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at
            "#,
            params![
                survey.id,
                survey.user_id,
                document,
                format_timestamp(&survey.created_at),
                format_timestamp(&survey.updated_at),
            ],
        )
        .map_err(db_error)?;

        Ok(())
    }

    /// Inserts `response` as-is, replacing any stored response with the same id.
    pub fn upsert_response(&self, response: &SurveyResponse) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let data = serde_json::to_string(&response.data)?;

        conn.execute(
            r#"
            INSERT INTO survey_responses (id, survey_id, data, submitted_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                survey_id = excluded.survey_id,
                data = excluded.data,
                submitted_at = excluded.submitted_at
            "#,
            params![
                response.id,
                response.survey_id,
                data,
                format_timestamp(&response.timestamp),
            ],
        )
        .map_err(db_error)?;

        Ok(())
    }
}

fn db_error(err: rusqlite::Error) -> StorageError {
    StorageError::OperationFailed(err.to_string())
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| StorageError::OperationFailed(format!("Invalid timestamp '{value}': {e}")))
}

fn survey_from_document(document: &str) -> Result<Survey, StorageError> {
    Ok(serde_json::from_str(document)?)
}

fn response_from_row((id, survey_id, data, submitted_at): ResponseRow) -> Result<SurveyResponse, StorageError> {
    let data: ResponseData = serde_json::from_str(&data)?;
    Ok(SurveyResponse {
        id,
        survey_id,
        data,
        timestamp: parse_timestamp(&submitted_at)?,
    })
}

fn read_response_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ResponseRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn load_survey(conn: &Connection, survey_id: &str) -> Result<Option<Survey>, StorageError> {
    let document: Option<String> = conn
        .query_row(
            "SELECT document FROM surveys WHERE id = ?1",
            params![survey_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(db_error)?;

    document.as_deref().map(survey_from_document).transpose()
}

#[async_trait]
impl SurveyStorage for SqliteSurveyStorage {
    async fn get_survey(&self, survey_id: &str) -> Result<Option<Survey>, StorageError> {
        let conn = self.lock()?;
        load_survey(&conn, survey_id)
    }

    async fn list_surveys(&self, owner_id: Option<&str>) -> Result<Vec<Survey>, StorageError> {
        let conn = self.lock()?;

        let documents = match owner_id {
            Some(owner) => conn
                .prepare("SELECT document FROM surveys WHERE user_id = ?1 ORDER BY seq ASC")
                .map_err(db_error)?
                .query_map(params![owner], |row| row.get::<_, String>(0))
                .map_err(db_error)?
                .collect::<Result<Vec<_>, _>>(),
            None => conn
                .prepare("SELECT document FROM surveys ORDER BY seq ASC")
                .map_err(db_error)?
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(db_error)?
                .collect::<Result<Vec<_>, _>>(),
        }
        .map_err(db_error)?;

        documents
            .iter()
            .map(|document| survey_from_document(document))
            .collect()
    }

    async fn create_survey(&self, draft: SurveyDraft) -> Result<Survey, StorageError> {
        let survey = Survey::from_draft(new_document_id(), draft, Utc::now());
        self.upsert_survey(&survey)?;
        tracing::debug!(survey_id = %survey.id, "Inserted survey row");
        Ok(survey)
    }

    async fn update_survey(
        &self,
        survey_id: &str,
        draft: SurveyDraft,
    ) -> Result<Option<Survey>, StorageError> {
        let conn = self.lock()?;

        let Some(mut survey) = load_survey(&conn, survey_id)? else {
            return Ok(None);
        };
        survey.replace_with(draft, Utc::now());
        let document = serde_json::to_string(&survey)?;

        conn.execute(
            r#"
            UPDATE surveys
            SET user_id = ?1, document = ?2, updated_at = ?3
            WHERE id = ?4
            "#,
            params![
                survey.user_id,
                document,
                format_timestamp(&survey.updated_at),
                survey_id
            ],
        )
        .map_err(db_error)?;

        Ok(Some(survey))
    }

    async fn delete_survey(&self, survey_id: &str) -> Result<bool, StorageError> {
        let conn = self.lock()?;
        let deleted = conn
            .execute("DELETE FROM surveys WHERE id = ?1", params![survey_id])
            .map_err(db_error)?;
        Ok(deleted > 0)
    }

    async fn list_responses(
        &self,
        filter: ResponseFilter,
    ) -> Result<Vec<SurveyResponse>, StorageError> {
        let conn = self.lock()?;

        let rows = match &filter {
            ResponseFilter::All => conn
                .prepare(
                    "SELECT id, survey_id, data, submitted_at
                     FROM survey_responses
                     ORDER BY seq ASC",
                )
                .map_err(db_error)?
                .query_map([], read_response_row)
                .map_err(db_error)?
                .collect::<Result<Vec<_>, _>>(),
            ResponseFilter::Survey(survey_id) => conn
                .prepare(
                    "SELECT id, survey_id, data, submitted_at
                     FROM survey_responses
                     WHERE survey_id = ?1
                     ORDER BY seq ASC",
                )
                .map_err(db_error)?
                .query_map(params![survey_id], read_response_row)
                .map_err(db_error)?
                .collect::<Result<Vec<_>, _>>(),
            ResponseFilter::Owner(owner) => conn
                .prepare(
                    "SELECT r.id, r.survey_id, r.data, r.submitted_at
                     FROM survey_responses r
                     JOIN surveys s ON s.id = r.survey_id
                     WHERE s.user_id = ?1
                     ORDER BY r.seq ASC",
                )
                .map_err(db_error)?
                .query_map(params![owner], read_response_row)
                .map_err(db_error)?
                .collect::<Result<Vec<_>, _>>(),
        }
        .map_err(db_error)?;

        rows.into_iter().map(response_from_row).collect()
    }

    async fn create_response(&self, draft: ResponseDraft) -> Result<SurveyResponse, StorageError> {
        let response = SurveyResponse::from_draft(new_document_id(), draft, Utc::now());
        self.upsert_response(&response)?;
        Ok(response)
    }

    async fn delete_responses(&self, survey_id: &str) -> Result<usize, StorageError> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM survey_responses WHERE survey_id = ?1",
            params![survey_id],
        )
        .map_err(db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_types::{Choice, ChoiceQuestion, Element, Page};

    fn draft(owner: &str, title: &str) -> SurveyDraft {
        SurveyDraft {
            user_id: Some(owner.to_string()),
            title: title.to_string(),
            pages: vec![Page {
                name: Some("page1".to_string()),
                title: None,
                elements: vec![Element::Radiogroup(ChoiceQuestion {
                    name: "nps".to_string(),
                    choices: (0..=10).map(|n| Choice::new(n, Some(&n.to_string()))).collect(),
                    ..Default::default()
                })],
            }],
            show_pages_as_separate: true,
            ..Default::default()
        }
    }

    fn answer(survey_id: &str, score: i64) -> ResponseDraft {
        ResponseDraft {
            survey_id: survey_id.to_string(),
            data: json!({ "nps": score }).as_object().cloned().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_survey_round_trip() {
        let storage = SqliteSurveyStorage::open_in_memory().unwrap();
        let created = storage.create_survey(draft("alice", "NPS")).await.unwrap();

        let fetched = storage.get_survey(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert!(fetched.show_pages_as_separate);
        assert!(storage.get_survey("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let storage = SqliteSurveyStorage::open_in_memory().unwrap();
        let created = storage.create_survey(draft("alice", "NPS")).await.unwrap();

        let updated = storage
            .update_survey(
                &created.id,
                SurveyDraft {
                    title: "Renamed".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert!(updated.is_owned_by("alice"));
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(
            storage.get_survey(&created.id).await.unwrap().unwrap(),
            updated
        );

        assert!(storage.delete_survey(&created.id).await.unwrap());
        assert!(!storage.delete_survey(&created.id).await.unwrap());
        assert!(storage
            .update_survey(&created.id, draft("alice", "x"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_by_owner_and_responses_by_owner() {
        let storage = SqliteSurveyStorage::open_in_memory().unwrap();
        let alice = storage.create_survey(draft("alice", "A")).await.unwrap();
        let bob = storage.create_survey(draft("bob", "B")).await.unwrap();

        storage.create_response(answer(&alice.id, 9)).await.unwrap();
        storage.create_response(answer(&bob.id, 3)).await.unwrap();
        storage.create_response(answer(&alice.id, 10)).await.unwrap();

        let surveys = storage.list_surveys(Some("alice")).await.unwrap();
        assert_eq!(surveys.len(), 1);
        assert_eq!(surveys[0].id, alice.id);
        assert_eq!(storage.list_surveys(None).await.unwrap().len(), 2);

        let owned = storage
            .list_responses(ResponseFilter::Owner("alice".to_string()))
            .await
            .unwrap();
        let scores: Vec<_> = owned.iter().map(|r| r.data["nps"].clone()).collect();
        assert_eq!(scores, vec![json!(9), json!(10)]);

        let all = storage.list_responses(ResponseFilter::All).await.unwrap();
        assert_eq!(all.len(), 3);

        assert_eq!(storage.delete_responses(&alice.id).await.unwrap(), 2);
        let remaining = storage.list_responses(ResponseFilter::All).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].survey_id, bob.id);
    }

    #[tokio::test]
    async fn test_response_timestamp_round_trip() {
        let storage = SqliteSurveyStorage::open_in_memory().unwrap();
        let survey = storage.create_survey(draft("alice", "A")).await.unwrap();
        let created = storage.create_response(answer(&survey.id, 7)).await.unwrap();

        let listed = storage
            .list_responses(ResponseFilter::Survey(survey.id.clone()))
            .await
            .unwrap();

        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn test_upsert_replaces_existing_document() {
        let storage = SqliteSurveyStorage::open_in_memory().unwrap();
        let mut survey = Survey::from_draft("legacy-1".to_string(), draft("alice", "Old"), Utc::now());

        storage.upsert_survey(&survey).unwrap();
        survey.title = "New".to_string();
        storage.upsert_survey(&survey).unwrap();

        let conn = storage.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM surveys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(load_survey(&conn, "legacy-1").unwrap().unwrap().title, "New");
    }
}
