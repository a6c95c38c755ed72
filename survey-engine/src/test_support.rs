use chrono::Utc;
use serde_json::Value;
use shared_types::{
    Choice, ChoiceQuestion, Element, Page, Survey, SurveyDraft, SurveyResponse, TextQuestion,
};

pub fn text_element(name: &str) -> Element {
    Element::Text(TextQuestion {
        name: name.to_string(),
        ..Default::default()
    })
}

/// `kind` is the editor type name: radiogroup, dropdown or checkbox.
pub fn choice_element(kind: &str, name: &str, values: &[Value]) -> Element {
    let question = ChoiceQuestion {
        name: name.to_string(),
        choices: values.iter().cloned().map(|v| Choice::new(v, None)).collect(),
        ..Default::default()
    };
    match kind {
        "radiogroup" => Element::Radiogroup(question),
        "dropdown" => Element::Dropdown(question),
        "checkbox" => Element::Checkbox(question),
        other => panic!("not a choice type: {other}"),
    }
}

pub fn rating_element(name: &str) -> Element {
    let values: Vec<Value> = (0..=10).map(Value::from).collect();
    choice_element("radiogroup", name, &values)
}

pub fn survey_with(elements: Vec<Element>) -> Survey {
    Survey::from_draft(
        "s1".to_string(),
        SurveyDraft {
            user_id: Some("owner-1".to_string()),
            title: "Test survey".to_string(),
            pages: vec![Page {
                elements,
                ..Default::default()
            }],
            ..Default::default()
        },
        Utc::now(),
    )
}

pub fn response(survey_id: &str, data: Value) -> SurveyResponse {
    let data = match data {
        Value::Object(map) => map,
        other => panic!("response data must be an object, got {other}"),
    };
    SurveyResponse {
        id: uuid::Uuid::new_v4().to_string(),
        survey_id: survey_id.to_string(),
        data,
        timestamp: Utc::now(),
    }
}
