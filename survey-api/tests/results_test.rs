mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use common::{nps_survey_body, setup_test_app};
use serde_json::{json, Value};
use shared_types::{QuestionSummary, Survey, SurveyResults};

#[actix_rt::test]
async fn test_results_compute_nps_per_rating_question() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::post()
        .uri("/api/surveys")
        .set_json(nps_survey_body("alice"))
        .to_request();
    let survey: Survey = test::call_and_read_body_json(&test_app.app, req).await;

    let submissions = [
        json!({ "recommend": 10, "why": "great" }),
        json!({ "recommend": 9 }),
        json!({ "recommend": "5", "recommend-Comment": "slow" }),
        json!({ "recommend": 7, "why": null }),
    ];
    for data in submissions {
        let req = TestRequest::post()
            .uri("/api/responses")
            .set_json(json!({ "surveyId": survey.id, "data": data }))
            .to_request();
        let resp = test::call_service(&test_app.app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = TestRequest::get()
        .uri(&format!("/api/surveys/{}/results", survey.id))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let results: SurveyResults = test::read_body_json(resp).await;

    assert_eq!(results.survey_id, survey.id);
    assert_eq!(results.response_count, 4);
    assert_eq!(results.nps.get("recommend"), Some(&25.0));
    assert!(!results.nps.contains_key("why"));

    let breakdown = &results.nps_breakdown["recommend"];
    assert_eq!(
        (breakdown.promoters, breakdown.passives, breakdown.detractors),
        (2, 1, 1)
    );

    let rating = &results.questions[0];
    let counts: Vec<(String, u32)> = rating
        .tally()
        .expect("rating question has a tally")
        .iter()
        .filter(|entry| entry.count > 0)
        .map(|entry| (entry.label.clone(), entry.count))
        .collect();
    // "5" is submitted as a string and does not match the numeric choice 5
    assert_eq!(
        counts,
        vec![
            ("7".to_string(), 1),
            ("9".to_string(), 1),
            ("10".to_string(), 1)
        ]
    );

    match &results.questions[0] {
        QuestionSummary::Choice { comments, .. } => assert_eq!(comments, &vec![json!("slow")]),
        other => panic!("unexpected summary {other:?}"),
    }
    match &results.questions[1] {
        QuestionSummary::Text { responses, .. } => assert_eq!(responses, &vec![json!("great")]),
        other => panic!("unexpected summary {other:?}"),
    }

    Ok(())
}

#[actix_rt::test]
async fn test_results_tally_checkbox_and_other() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::post()
        .uri("/api/surveys")
        .set_json(json!({
            "title": "Features",
            "pages": [{ "elements": [{
                "type": "checkbox",
                "name": "features",
                "hasOther": true,
                "otherText": "Something else",
                "choices": [
                    { "value": "speed", "text": "Speed" },
                    { "value": "price", "text": "Price" }
                ]
            }] }]
        }))
        .to_request();
    let survey: Survey = test::call_and_read_body_json(&test_app.app, req).await;

    for data in [
        json!({ "features": ["speed", "price"] }),
        json!({ "features": ["speed", "other"], "features-Comment": "docs" }),
        json!({ "features": ["unknown"] }),
        json!({}),
    ] {
        let req = TestRequest::post()
            .uri("/api/responses")
            .set_json(json!({ "surveyId": survey.id, "data": data }))
            .to_request();
        test::call_service(&test_app.app, req).await;
    }

    let req = TestRequest::get()
        .uri(&format!("/api/surveys/{}/results", survey.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&test_app.app, req).await;

    assert_eq!(body["responseCount"], 4);
    assert_eq!(body["nps"], json!({}));

    let question = &body["questions"][0];
    assert_eq!(question["kind"], "choice");
    assert_eq!(question["choiceType"], "checkbox");
    assert_eq!(
        question["tally"],
        json!([
            { "label": "Speed", "value": "speed", "count": 2 },
            { "label": "Price", "value": "price", "count": 1 },
            { "label": "Something else", "count": 1 }
        ])
    );
    assert_eq!(question["comments"], json!(["docs"]));

    Ok(())
}

#[actix_rt::test]
async fn test_results_for_missing_survey() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::get()
        .uri("/api/surveys/missing/results")
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}
