use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Submitted answers keyed by element name (and `<name>-Comment`).
pub type ResponseData = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SurveyResponse {
    pub id: String,
    pub survey_id: String,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub data: ResponseData,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

impl SurveyResponse {
    pub fn from_draft(id: String, draft: ResponseDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            survey_id: draft.survey_id,
            data: draft.data,
            timestamp: now,
        }
    }

    /// Submitted value for `key`; JSON `null` counts as not answered.
    pub fn answer(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|value| !value.is_null())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResponseDraft {
    pub survey_id: String,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub data: ResponseData,
}
