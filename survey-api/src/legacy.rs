//! One-shot import of the flat `surveys.json` / `responses.json` files kept by
//! the earlier Express server.

use crate::storage::SqliteSurveyStorage;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared_types::{ResponseData, ResponseDraft, Survey, SurveyDraft, SurveyResponse};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub surveys: usize,
    pub responses: usize,
    /// Documents that could not be read as a survey or response.
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacySurvey {
    id: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    draft: SurveyDraft,
}

impl LegacySurvey {
    /// Surveys rewritten by a PUT lost their `createdAt`; fall back to the
    /// last update, then to the import time.
    fn into_survey(self, now: DateTime<Utc>) -> Survey {
        let created_at = self.created_at.or(self.updated_at).unwrap_or(now);
        let mut survey = Survey::from_draft(self.id, self.draft, created_at);
        survey.updated_at = self.updated_at.unwrap_or(created_at);
        survey
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyResponse {
    id: String,
    survey_id: String,
    #[serde(default)]
    data: ResponseData,
    timestamp: Option<DateTime<Utc>>,
}

impl LegacyResponse {
    fn into_response(self, now: DateTime<Utc>) -> SurveyResponse {
        let timestamp = self.timestamp.unwrap_or(now);
        SurveyResponse::from_draft(
            self.id,
            ResponseDraft {
                survey_id: self.survey_id,
                data: self.data,
            },
            timestamp,
        )
    }
}

/// Upserts every readable document from the two files into `storage`,
/// keeping the original ids.
pub fn import_legacy(
    storage: &SqliteSurveyStorage,
    surveys_path: Option<&Path>,
    responses_path: Option<&Path>,
) -> anyhow::Result<ImportSummary> {
    let now = Utc::now();
    let mut summary = ImportSummary::default();

    if let Some(path) = surveys_path {
        for survey in read_documents::<LegacySurvey>(path, &mut summary.skipped) {
            storage.upsert_survey(&survey.into_survey(now))?;
            summary.surveys += 1;
        }
    }

    if let Some(path) = responses_path {
        for response in read_documents::<LegacyResponse>(path, &mut summary.skipped) {
            storage.upsert_response(&response.into_response(now))?;
            summary.responses += 1;
        }
    }

    info!(
        surveys = summary.surveys,
        responses = summary.responses,
        skipped = summary.skipped,
        "Legacy import finished"
    );
    Ok(summary)
}

/// A missing or malformed collection file reads as an empty collection.
fn read_documents<T: DeserializeOwned>(path: &Path, skipped: &mut usize) -> Vec<T> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read legacy file, treating as empty");
            return Vec::new();
        }
    };

    let documents: Vec<Value> = match serde_json::from_str(&contents) {
        Ok(documents) => documents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Legacy file is not a JSON array, treating as empty");
            return Vec::new();
        }
    };

    documents
        .into_iter()
        .enumerate()
        .filter_map(|(index, document)| match serde_json::from_value(document) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "Skipping legacy document");
                *skipped += 1;
                None
            }
        })
        .collect()
}
