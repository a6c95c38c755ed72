//! Route table shared by the server binary and the integration tests.

use crate::error::AppError;
use crate::handlers::{health, responses, results, surveys};
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/surveys", web::get().to(surveys::list_surveys))
            .route("/surveys", web::post().to(surveys::create_survey))
            .route("/surveys/{id}", web::get().to(surveys::get_survey))
            .route("/surveys/{id}", web::put().to(surveys::update_survey))
            .route("/surveys/{id}", web::delete().to(surveys::delete_survey))
            .route(
                "/surveys/{id}/results",
                web::get().to(results::get_survey_results),
            )
            .route("/responses", web::get().to(responses::list_responses))
            .route("/responses", web::post().to(responses::create_response))
            .route(
                "/responses/{survey_id}",
                web::delete().to(responses::delete_responses),
            ),
    );
}

/// Malformed bodies get the same JSON error shape as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1024 * 1024)
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}
