use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answer, with the input's title copied at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSnapshot {
    pub value: String,
    pub title: String,
}

/// A stored submission. `responses` is keyed by input id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    #[serde(alias = "_id")]
    pub id: i64,
    pub form_id: i64,
    pub responses: BTreeMap<String, AnswerSnapshot>,
    pub submitted_at: DateTime<Utc>,
}

impl FormResponse {
    pub fn value_for(&self, input_id: &str) -> Option<&str> {
        self.responses.get(input_id).map(|a| a.value.as_str())
    }
}

/// Body of `POST /api/forms/{id}/submit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default, rename = "formData")]
    pub form_data: HashMap<String, String>,
}

/// Plain `{message}` confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}
