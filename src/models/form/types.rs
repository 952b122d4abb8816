use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title given to a form created without one.
pub const DEFAULT_TITLE: &str = "Untitled Form";

/// The closed set of input kinds a form can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Email,
    Password,
    Number,
    Date,
}

impl InputType {
    pub const ALL: [InputType; 5] = [
        InputType::Text,
        InputType::Email,
        InputType::Password,
        InputType::Number,
        InputType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Number => "number",
            InputType::Date => "date",
        }
    }
}

/// An input field as stored inside a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Mirrors the array position; lists are never sorted by it.
    #[serde(default)]
    pub order: i64,
}

/// An input field as sent by a client. The id is optional and may be a
/// client-side temporary number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDraft {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl From<&InputField> for InputDraft {
    fn from(f: &InputField) -> Self {
        InputDraft {
            id: Some(f.id.clone()),
            input_type: f.input_type,
            title: f.title.clone(),
            placeholder: f.placeholder.clone(),
            required: f.required,
        }
    }
}

/// Accept string or numeric ids; anything else counts as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Body of create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<InputDraft>>,
}

/// A persisted form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(alias = "_id")]
    pub id: i64,
    pub title: String,
    pub inputs: Vec<InputField>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    pub fn input(&self, input_id: &str) -> Option<&InputField> {
        self.inputs.iter().find(|i| i.id == input_id)
    }
}

/// Missing or empty titles become [`DEFAULT_TITLE`]; anything else, including
/// whitespace, is kept verbatim.
pub fn resolve_title(raw: Option<&str>) -> String {
    match raw {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

pub fn new_input_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Turn client drafts into stored fields.
///
/// With `keep_ids`, a non-empty id that is not repeated earlier in the list
/// survives; every other input gets a fresh id. `order` is set to the position.
pub fn assign_input_ids(drafts: &[InputDraft], keep_ids: bool) -> Vec<InputField> {
    let mut seen = HashSet::new();
    drafts
        .iter()
        .enumerate()
        .map(|(position, draft)| {
            let id = match draft.id.as_deref() {
                Some(id) if keep_ids && !id.trim().is_empty() && seen.insert(id.to_string()) => {
                    id.to_string()
                }
                _ => {
                    let fresh = new_input_id();
                    seen.insert(fresh.clone());
                    fresh
                }
            };
            InputField {
                id,
                input_type: draft.input_type,
                title: draft.title.clone(),
                placeholder: draft.placeholder.clone(),
                required: draft.required,
                order: position as i64,
            }
        })
        .collect()
}
