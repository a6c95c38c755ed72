use serde_json::Value;
use shared_types::{
    ChoiceQuestion, ChoiceType, Element, QuestionSummary, Survey, SurveyResponse, TallyEntry,
    OTHER_SENTINEL,
};

/// Summarise every element of `survey`, in declaration order.
///
/// `responses` must already be restricted to this survey; nothing here checks
/// `survey_id`.
pub fn summarize(survey: &Survey, responses: &[SurveyResponse]) -> Vec<QuestionSummary> {
    survey
        .elements()
        .map(|element| summarize_element(element, responses))
        .collect()
}

pub fn summarize_element(element: &Element, responses: &[SurveyResponse]) -> QuestionSummary {
    let (choice_type, question) = match element {
        Element::Html(content) => {
            return QuestionSummary::Content {
                name: content.name.clone(),
                title: content.title.clone(),
                html: content.html.clone(),
            }
        }
        Element::Text(_) => {
            return QuestionSummary::Text {
                name: element.name().to_string(),
                title: element.display_title().to_string(),
                responses: collect_answers(responses, element.name()),
                comments: collect_answers(responses, &element.comment_key()),
            }
        }
        Element::Radiogroup(q) => (ChoiceType::Radiogroup, q),
        Element::Dropdown(q) => (ChoiceType::Dropdown, q),
        Element::Checkbox(q) => (ChoiceType::Checkbox, q),
    };

    let answers = collect_answers(responses, element.name());
    QuestionSummary::Choice {
        name: element.name().to_string(),
        title: element.display_title().to_string(),
        choice_type,
        tally: tally_choices(question, choice_type, &answers),
        responses: answers,
        comments: collect_answers(responses, &element.comment_key()),
    }
}

/// Values stored under `key`, in response order. Responses that never
/// answered (missing key or `null`) contribute nothing.
fn collect_answers(responses: &[SurveyResponse], key: &str) -> Vec<Value> {
    responses
        .iter()
        .filter_map(|response| response.answer(key))
        .cloned()
        .collect()
}

/// One bucket per declared choice, plus the "other" bucket last when enabled.
/// Submissions matching neither are dropped without notice.
fn tally_choices(
    question: &ChoiceQuestion,
    choice_type: ChoiceType,
    answers: &[Value],
) -> Vec<TallyEntry> {
    let mut tally: Vec<TallyEntry> = question
        .choices
        .iter()
        .map(|choice| TallyEntry {
            label: choice.label(),
            value: Some(choice.value.clone()),
            count: 0,
        })
        .collect();

    let other_bucket = if question.has_other {
        tally.push(TallyEntry {
            label: question.other_label().to_string(),
            value: None,
            count: 0,
        });
        Some(tally.len() - 1)
    } else {
        None
    };

    for answer in answers {
        let selections = match answer {
            Value::Array(items) if choice_type == ChoiceType::Checkbox => items.as_slice(),
            single => std::slice::from_ref(single),
        };

        for selection in selections {
            let bucket = match other_bucket {
                Some(index) if is_other(selection) => Some(index),
                _ => question
                    .choices
                    .iter()
                    .position(|choice| values_match(&choice.value, selection)),
            };

            if let Some(index) = bucket {
                tally[index].count += 1;
            }
        }
    }

    tally
}

fn is_other(value: &Value) -> bool {
    value.as_str() == Some(OTHER_SENTINEL)
}

/// Strict JSON equality, except that `9` and `9.0` are the same number.
fn values_match(declared: &Value, submitted: &Value) -> bool {
    match (declared, submitted) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => declared == submitted,
    }
}
