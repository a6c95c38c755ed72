/// Every type the front end consumes, in output order.
pub const API_TYPE_NAMES: &[&str] = &[
    "Survey",
    "SurveyDraft",
    "Page",
    "Element",
    "TextQuestion",
    "ChoiceQuestion",
    "HtmlContent",
    "Choice",
    "SurveyResponse",
    "ResponseDraft",
    "SurveyResults",
    "QuestionSummary",
    "TallyEntry",
    "ChoiceType",
    "NpsBreakdown",
    "ErrorResponse",
    "MessageResponse",
    "DeleteResponsesResponse",
    "HealthResponse",
];

pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut definitions = Vec::new();

    for name in type_names {
        let type_def = export_type(name)?;
        let cleaned = clean_type(type_def);

        if !cleaned.trim().is_empty() {
            definitions.push(cleaned);
        }
    }

    Ok(definitions.join("\n\n"))
}

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;
    use ts_rs::TS;

    let result = match name {
        "Survey" => Survey::export_to_string()?,
        "SurveyDraft" => SurveyDraft::export_to_string()?,
        "Page" => Page::export_to_string()?,
        "Element" => Element::export_to_string()?,
        "TextQuestion" => TextQuestion::export_to_string()?,
        "ChoiceQuestion" => ChoiceQuestion::export_to_string()?,
        "HtmlContent" => HtmlContent::export_to_string()?,
        "Choice" => Choice::export_to_string()?,

        "SurveyResponse" => SurveyResponse::export_to_string()?,
        "ResponseDraft" => ResponseDraft::export_to_string()?,

        "SurveyResults" => SurveyResults::export_to_string()?,
        "QuestionSummary" => QuestionSummary::export_to_string()?,
        "TallyEntry" => TallyEntry::export_to_string()?,
        "ChoiceType" => ChoiceType::export_to_string()?,
        "NpsBreakdown" => NpsBreakdown::export_to_string()?,

        "ErrorResponse" => ErrorResponse::export_to_string()?,
        "MessageResponse" => MessageResponse::export_to_string()?,
        "DeleteResponsesResponse" => DeleteResponsesResponse::export_to_string()?,
        "HealthResponse" => HealthResponse::export_to_string()?,

        _ => {
            return Err(format!(
                "Unknown type: '{}'. Available types can be found in shared-types/src/",
                name
            )
            .into());
        }
    };

    Ok(result)
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let lines: Vec<&str> = type_def.lines().collect();

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .cloned()
        .collect();

    filtered.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_single_type() {
        let result = generate_typescript_definitions(&["Survey"]).unwrap();
        assert!(result.contains("Survey"));
        assert!(result.contains("showPagesAsSeparate: boolean"));
    }

    #[test]
    fn test_generate_multiple_types() {
        let result = generate_typescript_definitions(&["SurveyResponse", "TallyEntry"]).unwrap();
        assert!(result.contains("SurveyResponse"));
        assert!(result.contains("TallyEntry"));
    }

    #[test]
    fn test_unknown_type_error() {
        let result = generate_typescript_definitions(&["NonExistentType"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown type"));
    }

    #[test]
    fn test_every_api_type_exports() {
        let result = generate_typescript_definitions(API_TYPE_NAMES).unwrap();
        for name in API_TYPE_NAMES {
            assert!(result.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_empty_type_names() {
        let result = generate_typescript_definitions(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cleaned_output() {
        let result = generate_typescript_definitions(&["Element"]).unwrap();
        assert!(!result.contains("import type"));
        assert!(!result.contains("This file was generated"));
    }
}
