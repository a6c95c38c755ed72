use super::AppState;
use crate::error::AppError;
use crate::models::ResponseListQuery;
use actix_web::{web, HttpResponse, Result};
use shared_types::{DeleteResponsesResponse, ResponseDraft};
use survey_engine::{missing_required, ValidationError};
use tracing::{info, warn};

pub async fn list_responses(
    data: web::Data<AppState>,
    query: web::Query<ResponseListQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.filter();
    let responses = data.storage.list_responses(filter.clone()).await?;
    info!(filter = ?filter, count = responses.len(), "Listed responses");
    Ok(HttpResponse::Ok().json(responses))
}

pub async fn create_response(
    data: web::Data<AppState>,
    request: web::Json<ResponseDraft>,
) -> Result<HttpResponse, AppError> {
    let draft = request.into_inner();
    if draft.survey_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "surveyId cannot be empty".to_string(),
        ));
    }

    let Some(survey) = data.storage.get_survey(&draft.survey_id).await? else {
        warn!(survey_id = %draft.survey_id, "Response submitted for missing survey");
        return Err(AppError::SurveyNotFound(draft.survey_id));
    };

    if data.enforce_required {
        let missing = missing_required(&survey, &draft.data);
        if !missing.is_empty() {
            warn!(survey_id = %survey.id, missing = ?missing, "Rejected incomplete response");
            return Err(ValidationError::MissingRequired(missing).into());
        }
    }

    let response = data.storage.create_response(draft).await?;
    info!(
        survey_id = %response.survey_id,
        response_id = %response.id,
        "Stored response"
    );

    Ok(HttpResponse::Created().json(response))
}

pub async fn delete_responses(
    data: web::Data<AppState>,
    survey_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = survey_id.into_inner();
    let deleted = data.storage.delete_responses(&id).await?;
    info!(survey_id = %id, deleted, "Deleted responses");

    Ok(HttpResponse::Ok().json(DeleteResponsesResponse {
        message: "Responses deleted".to_string(),
        deleted: deleted as u32,
    }))
}
