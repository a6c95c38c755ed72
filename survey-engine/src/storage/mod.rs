use async_trait::async_trait;
use shared_types::{ResponseDraft, Survey, SurveyDraft, SurveyResponse};

mod memory;

pub use memory::InMemoryStorage;

/// Which responses to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFilter {
    All,
    Survey(String),
    /// Responses to any survey owned by this user.
    Owner(String),
}

/// Per-document persistence for surveys and their responses.
///
/// Every write touches exactly one survey, or the responses of exactly one
/// survey. Listings come back in creation order.
#[async_trait]
pub trait SurveyStorage: Send + Sync {
    async fn get_survey(&self, survey_id: &str) -> Result<Option<Survey>, StorageError>;
    async fn list_surveys(&self, owner_id: Option<&str>) -> Result<Vec<Survey>, StorageError>;
    async fn create_survey(&self, draft: SurveyDraft) -> Result<Survey, StorageError>;
    async fn update_survey(
        &self,
        survey_id: &str,
        draft: SurveyDraft,
    ) -> Result<Option<Survey>, StorageError>;
    /// Responses are left alone; callers delete them separately.
    async fn delete_survey(&self, survey_id: &str) -> Result<bool, StorageError>;

    async fn list_responses(
        &self,
        filter: ResponseFilter,
    ) -> Result<Vec<SurveyResponse>, StorageError>;
    async fn create_response(&self, draft: ResponseDraft) -> Result<SurveyResponse, StorageError>;
    async fn delete_responses(&self, survey_id: &str) -> Result<usize, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Fresh identifier for a stored survey or response.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
