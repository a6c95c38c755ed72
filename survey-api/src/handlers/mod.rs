pub mod health;
pub mod responses;
pub mod results;
pub mod surveys;

use std::sync::Arc;
use survey_engine::SurveyStorage;

pub struct AppState {
    pub storage: Arc<dyn SurveyStorage>,
    pub enforce_required: bool,
}

impl AppState {
    pub fn new(storage: Arc<dyn SurveyStorage>) -> Self {
        Self {
            storage,
            enforce_required: false,
        }
    }

    pub fn with_enforce_required(mut self, enforce_required: bool) -> Self {
        self.enforce_required = enforce_required;
        self
    }
}
