//! Survey results engine.
//!
//! Everything here is a pure function of a survey definition and the
//! responses collected for it, except [`storage`], which defines the
//! per-document persistence contract the server builds on.

pub mod aggregation;
pub mod nps;
pub mod storage;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregation::{summarize, summarize_element};
pub use nps::{compute_nps, is_nps_question, nps_breakdown};
pub use storage::{InMemoryStorage, ResponseFilter, StorageError, SurveyStorage};
pub use validation::{missing_required, validate_draft, ValidationError};

use shared_types::{Survey, SurveyResponse, SurveyResults};

/// Summary plus NPS for one survey, ready to serve.
pub fn build_results(survey: &Survey, responses: &[SurveyResponse]) -> SurveyResults {
    let breakdown = nps_breakdown(survey, responses);
    SurveyResults {
        survey_id: survey.id.clone(),
        title: survey.title.clone(),
        response_count: responses.len() as u32,
        questions: summarize(survey, responses),
        nps: breakdown
            .iter()
            .map(|(name, entry)| (name.clone(), entry.score))
            .collect(),
        nps_breakdown: breakdown,
    }
}
