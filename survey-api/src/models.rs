use serde::Deserialize;
use survey_engine::ResponseFilter;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyListQuery {
    pub user_id: Option<String>,
}

impl SurveyListQuery {
    /// `?userId=` with an empty value lists everything.
    pub fn owner(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseListQuery {
    pub survey_id: Option<String>,
    pub user_id: Option<String>,
}

impl ResponseListQuery {
    /// A survey id wins over a user id when both are given.
    pub fn filter(&self) -> ResponseFilter {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        match (non_empty(&self.survey_id), non_empty(&self.user_id)) {
            (Some(survey_id), _) => ResponseFilter::Survey(survey_id),
            (None, Some(user_id)) => ResponseFilter::Owner(user_id),
            (None, None) => ResponseFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_filter_precedence() {
        let query = ResponseListQuery {
            survey_id: Some("s1".to_string()),
            user_id: Some("u1".to_string()),
        };
        assert_eq!(query.filter(), ResponseFilter::Survey("s1".to_string()));

        let query = ResponseListQuery {
            survey_id: Some(String::new()),
            user_id: Some("u1".to_string()),
        };
        assert_eq!(query.filter(), ResponseFilter::Owner("u1".to_string()));

        assert_eq!(ResponseListQuery::default().filter(), ResponseFilter::All);
    }

    #[test]
    fn test_empty_owner_lists_everything() {
        let query = SurveyListQuery {
            user_id: Some(String::new()),
        };
        assert_eq!(query.owner(), None);
    }
}
