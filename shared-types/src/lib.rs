use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod response;
pub mod results;
pub mod survey;
pub mod typescript_gen;

pub use typescript_gen::{generate_typescript_definitions, API_TYPE_NAMES};

pub use response::{ResponseData, ResponseDraft, SurveyResponse};
pub use results::{ChoiceType, NpsBreakdown, QuestionSummary, SurveyResults, TallyEntry};
pub use survey::{
    Choice, ChoiceQuestion, Element, HtmlContent, Page, Survey, SurveyDraft, TextQuestion,
    COMMENT_SUFFIX, DEFAULT_OTHER_LABEL, OTHER_SENTINEL,
};

// Envelopes shared by the survey API and its front end

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeleteResponsesResponse {
    pub message: String,
    pub deleted: u32,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
