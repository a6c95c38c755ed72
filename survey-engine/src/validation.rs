use serde_json::Value;
use shared_types::{ResponseData, Survey, SurveyDraft};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Element name '{0}' is used more than once")]
    DuplicateElementName(String),

    #[error("Missing answers for required questions: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}

/// Checks an editor document before it is stored. Titles are optional, the
/// editor posts bare `{ "elements": [...] }` documents.
pub fn validate_draft(draft: &SurveyDraft) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let elements = draft
        .pages
        .iter()
        .flat_map(|page| page.elements.iter())
        .chain(draft.elements.iter());
    for element in elements {
        // html blocks may be left unnamed
        if element.name().is_empty() && !element.is_question() {
            continue;
        }
        if !seen.insert(element.name()) {
            return Err(ValidationError::DuplicateElementName(
                element.name().to_string(),
            ));
        }
    }

    Ok(())
}

/// Names of required questions that `data` leaves unanswered, in document
/// order.
pub fn missing_required(survey: &Survey, data: &ResponseData) -> Vec<String> {
    survey
        .elements()
        .filter(|element| element.is_question() && element.is_required())
        .filter(|element| !is_answered(data.get(element.name())))
        .map(|element| element.name().to_string())
        .collect()
}

fn is_answered(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{choice_element, survey_with, text_element};
    use serde_json::json;
    use shared_types::{Element, HtmlContent, Page};

    fn required(mut element: Element) -> Element {
        match &mut element {
            Element::Text(q) => q.is_required = true,
            Element::Radiogroup(q) | Element::Dropdown(q) | Element::Checkbox(q) => {
                q.is_required = true
            }
            Element::Html(_) => {}
        }
        element
    }

    #[test]
    fn test_missing_required_lists_unanswered() {
        let survey = survey_with(vec![
            required(text_element("name")),
            required(choice_element("checkbox", "tags", &[json!("a")])),
            text_element("optional"),
            required(choice_element("radiogroup", "score", &[json!(0)])),
        ]);
        let data = json!({ "name": "  ", "tags": [], "score": 0 });

        let missing = missing_required(&survey, data.as_object().unwrap());

        assert_eq!(missing, vec!["name".to_string(), "tags".to_string()]);
    }

    #[test]
    fn test_untitled_elements_only_draft_is_valid() {
        let draft = SurveyDraft {
            elements: vec![
                choice_element("radiogroup", "q1", &[json!(0), json!(10)]),
                text_element("q2"),
            ],
            ..Default::default()
        };
        assert_eq!(validate_draft(&draft), Ok(()));
    }

    #[test]
    fn test_draft_rejects_duplicate_names_across_pages() {
        let draft = SurveyDraft {
            title: "Feedback".to_string(),
            pages: vec![
                Page {
                    elements: vec![text_element("q1")],
                    ..Default::default()
                },
                Page {
                    elements: vec![
                        Element::Html(HtmlContent::default()),
                        Element::Html(HtmlContent::default()),
                        text_element("q1"),
                    ],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::DuplicateElementName("q1".to_string()))
        );
    }

    #[test]
    fn test_missing_required_message() {
        let err = ValidationError::MissingRequired(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            err.to_string(),
            "Missing answers for required questions: a, b"
        );
    }
}
