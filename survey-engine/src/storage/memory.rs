use crate::storage::{new_document_id, ResponseFilter, StorageError, SurveyStorage};
use chrono::Utc;
use shared_types::{ResponseDraft, Survey, SurveyDraft, SurveyResponse};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Map-backed store with an owner index over surveys and a survey index over
/// responses. Each document carries an insertion sequence number so listings
/// keep creation order.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    surveys: HashMap<String, (u64, Survey)>,
    surveys_by_owner: HashMap<String, Vec<String>>,
    responses_by_survey: HashMap<String, Vec<(u64, SurveyResponse)>>,
}

impl Inner {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn index_owner(&mut self, owner: Option<&str>, survey_id: &str) {
        if let Some(owner) = owner {
            self.surveys_by_owner
                .entry(owner.to_string())
                .or_default()
                .push(survey_id.to_string());
        }
    }

    fn unindex_owner(&mut self, owner: Option<&str>, survey_id: &str) {
        let Some(owner) = owner else { return };
        if let Some(ids) = self.surveys_by_owner.get_mut(owner) {
            ids.retain(|id| id != survey_id);
            if ids.is_empty() {
                self.surveys_by_owner.remove(owner);
            }
        }
    }

    fn owned_survey_ids(&self, owner: &str) -> &[String] {
        self.surveys_by_owner
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StorageError> {
        self.inner
            .read()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StorageError> {
        self.inner
            .write()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
    }
}

fn in_creation_order<T>(mut docs: Vec<(u64, T)>) -> Vec<T> {
    docs.sort_by_key(|(seq, _)| *seq);
    docs.into_iter().map(|(_, doc)| doc).collect()
}

#[async_trait::async_trait]
impl SurveyStorage for InMemoryStorage {
    async fn get_survey(&self, survey_id: &str) -> Result<Option<Survey>, StorageError> {
        Ok(self
            .read()?
            .surveys
            .get(survey_id)
            .map(|(_, survey)| survey.clone()))
    }

    async fn list_surveys(&self, owner_id: Option<&str>) -> Result<Vec<Survey>, StorageError> {
        let inner = self.read()?;
        let surveys = match owner_id {
            Some(owner) => inner
                .owned_survey_ids(owner)
                .iter()
                .filter_map(|id| inner.surveys.get(id).cloned())
                .collect(),
            None => inner.surveys.values().cloned().collect(),
        };
        Ok(in_creation_order(surveys))
    }

    async fn create_survey(&self, draft: SurveyDraft) -> Result<Survey, StorageError> {
        let survey = Survey::from_draft(new_document_id(), draft, Utc::now());

        let mut inner = self.write()?;
        let seq = inner.next_seq();
        inner.index_owner(survey.user_id.as_deref(), &survey.id);
        inner
            .surveys
            .insert(survey.id.clone(), (seq, survey.clone()));

        tracing::debug!(survey_id = %survey.id, "Stored survey in memory");
        Ok(survey)
    }

    async fn update_survey(
        &self,
        survey_id: &str,
        draft: SurveyDraft,
    ) -> Result<Option<Survey>, StorageError> {
        let mut inner = self.write()?;
        let Some((_, survey)) = inner.surveys.get_mut(survey_id) else {
            return Ok(None);
        };

        let previous_owner = survey.user_id.clone();
        survey.replace_with(draft, Utc::now());
        let updated = survey.clone();

        if previous_owner != updated.user_id {
            inner.unindex_owner(previous_owner.as_deref(), survey_id);
            inner.index_owner(updated.user_id.as_deref(), survey_id);
        }

        Ok(Some(updated))
    }

    async fn delete_survey(&self, survey_id: &str) -> Result<bool, StorageError> {
        let mut inner = self.write()?;
        match inner.surveys.remove(survey_id) {
            Some((_, survey)) => {
                inner.unindex_owner(survey.user_id.as_deref(), survey_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_responses(
        &self,
        filter: ResponseFilter,
    ) -> Result<Vec<SurveyResponse>, StorageError> {
        let inner = self.read()?;
        let responses: Vec<(u64, SurveyResponse)> = match &filter {
            ResponseFilter::All => inner
                .responses_by_survey
                .values()
                .flatten()
                .cloned()
                .collect(),
            ResponseFilter::Survey(survey_id) => inner
                .responses_by_survey
                .get(survey_id)
                .cloned()
                .unwrap_or_default(),
            ResponseFilter::Owner(owner) => inner
                .owned_survey_ids(owner)
                .iter()
                .filter_map(|id| inner.responses_by_survey.get(id))
                .flatten()
                .cloned()
                .collect(),
        };
        Ok(in_creation_order(responses))
    }

    async fn create_response(&self, draft: ResponseDraft) -> Result<SurveyResponse, StorageError> {
        let response = SurveyResponse::from_draft(new_document_id(), draft, Utc::now());

        let mut inner = self.write()?;
        let seq = inner.next_seq();
        inner
            .responses_by_survey
            .entry(response.survey_id.clone())
            .or_default()
            .push((seq, response.clone()));

        Ok(response)
    }

    async fn delete_responses(&self, survey_id: &str) -> Result<usize, StorageError> {
        Ok(self
            .write()?
            .responses_by_survey
            .remove(survey_id)
            .map(|responses| responses.len())
            .unwrap_or(0))
    }
}
