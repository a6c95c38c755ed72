use super::AppState;
use crate::error::AppError;
use actix_web::{web, HttpResponse, Result};
use survey_engine::{build_results, ResponseFilter};
use tracing::{info, warn};

/// Aggregated view of one survey: per-question summaries and NPS.
pub async fn get_survey_results(
    data: web::Data<AppState>,
    survey_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = survey_id.into_inner();

    let Some(survey) = data.storage.get_survey(&id).await? else {
        warn!(survey_id = %id, "Results requested for missing survey");
        return Err(AppError::SurveyNotFound(id));
    };

    let responses = data
        .storage
        .list_responses(ResponseFilter::Survey(id.clone()))
        .await?;
    let results = build_results(&survey, &responses);

    info!(
        survey_id = %id,
        responses = results.response_count,
        nps_questions = results.nps.len(),
        "Computed survey results"
    );

    Ok(HttpResponse::Ok().json(results))
}
