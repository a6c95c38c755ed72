#![allow(dead_code)]

use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use survey_api::handlers::AppState;
use survey_api::routes::configure_routes;
use survey_api::storage::SqliteSurveyStorage;
use survey_engine::SurveyStorage;

pub struct TestApp<S> {
    pub storage: Arc<dyn SurveyStorage>,
    pub app: S,
}

pub async fn setup_test_app() -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    setup_test_app_with(false).await
}

pub async fn setup_test_app_with(
    enforce_required: bool,
) -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    let storage: Arc<dyn SurveyStorage> = Arc::new(SqliteSurveyStorage::open_in_memory()?);
    let state = AppState::new(storage.clone()).with_enforce_required(enforce_required);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    Ok(TestApp { storage, app })
}

/// Editor-style survey: one 0-10 rating question and an optional comment box.
pub fn nps_survey_body(owner: &str) -> Value {
    let choices: Vec<Value> = (0..=10)
        .map(|n| json!({ "value": n, "text": n.to_string() }))
        .collect();

    json!({
        "userId": owner,
        "title": "Customer NPS",
        "pages": [{
            "name": "page1",
            "elements": [
                {
                    "type": "radiogroup",
                    "name": "recommend",
                    "title": "How likely are you to recommend us?",
                    "isRequired": true,
                    "choices": choices
                },
                { "type": "text", "name": "why", "title": "Why?" }
            ]
        }]
    })
}
