use serde_json::Value;
use shared_types::{Element, NpsBreakdown, Survey, SurveyResponse};
use std::collections::BTreeMap;

const SCALE_MIN: f64 = 0.0;
const SCALE_MAX: f64 = 10.0;
const PROMOTER_MIN: f64 = 9.0;
const DETRACTOR_MAX: f64 = 6.0;

/// A single-choice question counts as an NPS rating when at least one of its
/// declared values sits on the 0..=10 scale.
pub fn is_nps_question(element: &Element) -> bool {
    match element {
        Element::Radiogroup(question) => question.choices.iter().any(|choice| {
            numeric_value(&choice.value).is_some_and(on_scale)
        }),
        _ => false,
    }
}

/// NPS per eligible question name. Questions without a single numeric answer
/// are left out, so an empty map means "no NPS data".
pub fn compute_nps(survey: &Survey, responses: &[SurveyResponse]) -> BTreeMap<String, f64> {
    nps_breakdown(survey, responses)
        .into_iter()
        .map(|(name, breakdown)| (name, breakdown.score))
        .collect()
}

pub fn nps_breakdown(
    survey: &Survey,
    responses: &[SurveyResponse],
) -> BTreeMap<String, NpsBreakdown> {
    survey
        .elements()
        .filter(|element| is_nps_question(element))
        .filter_map(|element| {
            let ratings = responses
                .iter()
                .filter_map(|response| response.answer(element.name()))
                .filter_map(numeric_value)
                .filter(|rating| on_scale(*rating));
            classify(ratings).map(|breakdown| (element.name().to_string(), breakdown))
        })
        .collect()
}

fn classify(ratings: impl Iterator<Item = f64>) -> Option<NpsBreakdown> {
    let mut breakdown = NpsBreakdown {
        promoters: 0,
        passives: 0,
        detractors: 0,
        total: 0,
        score: 0.0,
    };

    for rating in ratings {
        if rating >= PROMOTER_MIN {
            breakdown.promoters += 1;
        } else if rating <= DETRACTOR_MAX {
            breakdown.detractors += 1;
        } else {
            breakdown.passives += 1;
        }
        breakdown.total += 1;
    }

    if breakdown.total == 0 {
        return None;
    }

    let net = f64::from(breakdown.promoters) - f64::from(breakdown.detractors);
    breakdown.score = round_to_hundredths(net / f64::from(breakdown.total) * 100.0);
    Some(breakdown)
}

/// Numbers, or strings holding a number ("9" from a text-valued choice).
fn numeric_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn on_scale(rating: f64) -> bool {
    (SCALE_MIN..=SCALE_MAX).contains(&rating)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
