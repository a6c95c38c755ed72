use super::AppState;
use crate::error::AppError;
use crate::models::SurveyListQuery;
use actix_web::{web, HttpResponse, Result};
use shared_types::{MessageResponse, SurveyDraft};
use survey_engine::validate_draft;
use tracing::{info, warn};

pub async fn list_surveys(
    data: web::Data<AppState>,
    query: web::Query<SurveyListQuery>,
) -> Result<HttpResponse, AppError> {
    let surveys = data.storage.list_surveys(query.owner()).await?;
    info!(
        owner = query.owner().unwrap_or("*"),
        count = surveys.len(),
        "Listed surveys"
    );
    Ok(HttpResponse::Ok().json(surveys))
}

pub async fn get_survey(
    data: web::Data<AppState>,
    survey_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = survey_id.into_inner();

    match data.storage.get_survey(&id).await? {
        Some(survey) => Ok(HttpResponse::Ok().json(survey)),
        None => {
            warn!(survey_id = %id, "Survey not found");
            Err(AppError::SurveyNotFound(id))
        }
    }
}

pub async fn create_survey(
    data: web::Data<AppState>,
    request: web::Json<SurveyDraft>,
) -> Result<HttpResponse, AppError> {
    let draft = request.into_inner();
    validate_draft(&draft)?;

    let survey = data.storage.create_survey(draft).await?;
    info!(survey_id = %survey.id, title = %survey.title, "Created survey");

    Ok(HttpResponse::Created().json(survey))
}

pub async fn update_survey(
    data: web::Data<AppState>,
    survey_id: web::Path<String>,
    request: web::Json<SurveyDraft>,
) -> Result<HttpResponse, AppError> {
    let id = survey_id.into_inner();
    let draft = request.into_inner();
    validate_draft(&draft)?;

    match data.storage.update_survey(&id, draft).await? {
        Some(survey) => {
            info!(survey_id = %id, "Updated survey");
            Ok(HttpResponse::Ok().json(survey))
        }
        None => {
            warn!(survey_id = %id, "Cannot update missing survey");
            Err(AppError::SurveyNotFound(id))
        }
    }
}

/// Responses stay in place; the client clears them with a second call.
pub async fn delete_survey(
    data: web::Data<AppState>,
    survey_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = survey_id.into_inner();

    if data.storage.delete_survey(&id).await? {
        info!(survey_id = %id, "Deleted survey");
        Ok(HttpResponse::Ok().json(MessageResponse::new("Survey deleted")))
    } else {
        warn!(survey_id = %id, "Cannot delete missing survey");
        Err(AppError::SurveyNotFound(id))
    }
}
