use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Submission value meaning "the respondent typed their own answer".
pub const OTHER_SENTINEL: &str = "other";

/// Caption of the "other" bucket when the question does not configure one.
pub const DEFAULT_OTHER_LABEL: &str = "Other";

/// Suffix of the response-data key holding an element's comment.
pub const COMMENT_SUFFIX: &str = "-Comment";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Survey {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub show_pages_as_separate: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl Survey {
    /// Builds a new survey from a draft, stamping both timestamps with `now`.
    pub fn from_draft(id: String, draft: SurveyDraft, now: DateTime<Utc>) -> Self {
        let (user_id, title, pages, show_pages_as_separate) = draft.into_parts();
        Self {
            id,
            user_id,
            title,
            pages,
            show_pages_as_separate,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whole-document replace. `id` and `created_at` survive, the owner survives
    /// when the draft does not name one.
    pub fn replace_with(&mut self, draft: SurveyDraft, now: DateTime<Utc>) {
        let (user_id, title, pages, show_pages_as_separate) = draft.into_parts();
        if user_id.is_some() {
            self.user_id = user_id;
        }
        self.title = title;
        self.pages = pages;
        self.show_pages_as_separate = show_pages_as_separate;
        self.updated_at = now;
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }

    /// All elements across pages, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.pages.iter().flat_map(|page| page.elements.iter())
    }

    pub fn find_element(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name() == name)
    }

    /// Pages as the respondent sees them: one merged page unless the survey
    /// asks for separate pages.
    pub fn display_pages(&self) -> Vec<Page> {
        if self.show_pages_as_separate || self.pages.len() <= 1 {
            return self.pages.clone();
        }

        vec![Page {
            name: self.pages.first().and_then(|page| page.name.clone()),
            title: None,
            elements: self.elements().cloned().collect(),
        }]
    }
}

/// Survey document as posted by the editor (create and full replace).
///
/// Older clients post a bare `{ "elements": [...] }` document without pages;
/// those elements become the single page of the survey.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SurveyDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub show_pages_as_separate: bool,
}

impl SurveyDraft {
    fn into_parts(self) -> (Option<String>, String, Vec<Page>, bool) {
        let mut pages = self.pages;
        if !self.elements.is_empty() {
            if pages.is_empty() {
                pages.push(Page::default());
            }
            pages[0].elements.extend(self.elements);
        }
        (
            self.user_id.filter(|id| !id.is_empty()),
            self.title,
            pages,
            self.show_pages_as_separate,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "lowercase")]
#[ts(export)]
pub enum Element {
    Text(TextQuestion),
    Radiogroup(ChoiceQuestion),
    Dropdown(ChoiceQuestion),
    Checkbox(ChoiceQuestion),
    Html(HtmlContent),
}

impl Element {
    pub fn name(&self) -> &str {
        match self {
            Element::Text(q) => &q.name,
            Element::Radiogroup(q) | Element::Dropdown(q) | Element::Checkbox(q) => &q.name,
            Element::Html(c) => &c.name,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Element::Text(q) => q.title.as_deref(),
            Element::Radiogroup(q) | Element::Dropdown(q) | Element::Checkbox(q) => {
                q.title.as_deref()
            }
            Element::Html(c) => c.title.as_deref(),
        }
    }

    /// Title shown to people, falling back to the element name.
    pub fn display_title(&self) -> &str {
        self.title().unwrap_or_else(|| self.name())
    }

    /// Static content carries no answers.
    pub fn is_question(&self) -> bool {
        !matches!(self, Element::Html(_))
    }

    pub fn is_required(&self) -> bool {
        match self {
            Element::Text(q) => q.is_required,
            Element::Radiogroup(q) | Element::Dropdown(q) | Element::Checkbox(q) => {
                q.is_required
            }
            Element::Html(_) => false,
        }
    }

    pub fn choice_question(&self) -> Option<&ChoiceQuestion> {
        match self {
            Element::Radiogroup(q) | Element::Dropdown(q) | Element::Checkbox(q) => Some(q),
            Element::Text(_) | Element::Html(_) => None,
        }
    }

    pub fn comment_key(&self) -> String {
        format!("{}{}", self.name(), COMMENT_SUFFIX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TextQuestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub has_comment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_text: Option<String>,
    /// Editor properties this server does not interpret, kept verbatim.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChoiceQuestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub has_other: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_text: Option<String>,
    #[serde(default)]
    pub has_comment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_text: Option<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl ChoiceQuestion {
    pub fn other_label(&self) -> &str {
        self.other_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_OTHER_LABEL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HtmlContent {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

/// One option of a choice question. Accepts both `{ "value": 3, "text": "3" }`
/// and a bare scalar, which is then its own label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(from = "ChoiceRepr")]
#[ts(export)]
pub struct Choice {
    #[ts(type = "unknown")]
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Choice {
    pub fn new(value: impl Into<Value>, text: Option<&str>) -> Self {
        Self {
            value: value.into(),
            text: text.map(str::to_string),
        }
    }

    pub fn label(&self) -> String {
        match &self.text {
            Some(text) if !text.is_empty() => text.clone(),
            _ => value_label(&self.value),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChoiceRepr {
    Detailed {
        value: Value,
        #[serde(default)]
        text: Option<String>,
    },
    Plain(Value),
}

impl From<ChoiceRepr> for Choice {
    fn from(repr: ChoiceRepr) -> Self {
        match repr {
            ChoiceRepr::Detailed { value, text } => Choice { value, text },
            ChoiceRepr::Plain(value) => Choice { value, text: None },
        }
    }
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
