use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ChoiceType {
    Radiogroup,
    Dropdown,
    Checkbox,
}

/// Count for one bucket of a choice question. `value` is absent for the
/// "other" bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TallyEntry {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "unknown")]
    pub value: Option<Value>,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionSummary {
    Content {
        name: String,
        title: Option<String>,
        html: Option<String>,
    },
    Text {
        name: String,
        title: String,
        #[ts(type = "Array<unknown>")]
        responses: Vec<Value>,
        #[ts(type = "Array<unknown>")]
        comments: Vec<Value>,
    },
    Choice {
        name: String,
        title: String,
        #[serde(rename = "choiceType")]
        choice_type: ChoiceType,
        #[ts(type = "Array<unknown>")]
        responses: Vec<Value>,
        tally: Vec<TallyEntry>,
        #[ts(type = "Array<unknown>")]
        comments: Vec<Value>,
    },
}

impl QuestionSummary {
    pub fn name(&self) -> &str {
        match self {
            QuestionSummary::Content { name, .. }
            | QuestionSummary::Text { name, .. }
            | QuestionSummary::Choice { name, .. } => name,
        }
    }

    pub fn tally(&self) -> Option<&[TallyEntry]> {
        match self {
            QuestionSummary::Choice { tally, .. } => Some(tally),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NpsBreakdown {
    pub promoters: u32,
    pub passives: u32,
    pub detractors: u32,
    pub total: u32,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SurveyResults {
    pub survey_id: String,
    pub title: String,
    pub response_count: u32,
    pub questions: Vec<QuestionSummary>,
    pub nps: BTreeMap<String, f64>,
    pub nps_breakdown: BTreeMap<String, NpsBreakdown>,
}
