use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use super::service::{ClientError, FormServiceClient};
use crate::models::form::{Form, InputType};
use crate::models::response::FormResponse;

/// Shown in the response table where a response has no answer.
pub const MISSING_ANSWER: &str = "-";

/// Column header for an input saved without a title.
pub const UNTITLED_FIELD: &str = "Untitled Field";

#[derive(Debug)]
pub enum ViewerError {
    AlreadySubmitted,
    /// Titles of required inputs that are still blank.
    MissingRequired(Vec<String>),
    Client(ClientError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::AlreadySubmitted => write!(f, "This form has already been submitted"),
            ViewerError::MissingRequired(titles) => {
                write!(f, "Please fill in: {}", titles.join(", "))
            }
            ViewerError::Client(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ViewerError {}

impl From<ClientError> for ViewerError {
    fn from(e: ClientError) -> Self {
        ViewerError::Client(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Filling,
    Submitted,
}

/// One rendered control. Every input type is a single-line field; the type
/// only changes how the browser parses or masks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub input_id: String,
    pub label: String,
    pub placeholder: String,
    pub html_type: &'static str,
    pub masked: bool,
    pub required: bool,
}

/// Respondent-side state for filling in one form.
#[derive(Debug, Clone)]
pub struct FormViewer {
    form: Form,
    answers: HashMap<String, String>,
    state: ViewerState,
}

impl FormViewer {
    pub fn new(form: Form) -> Self {
        let answers = form
            .inputs
            .iter()
            .map(|i| (i.id.clone(), String::new()))
            .collect();
        FormViewer {
            form,
            answers,
            state: ViewerState::Filling,
        }
    }

    pub async fn load(client: &FormServiceClient, form_id: i64) -> Result<Self, ClientError> {
        Ok(Self::new(client.get_form(form_id).await?))
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    pub fn answer(&self, input_id: &str) -> Option<&str> {
        self.answers.get(input_id).map(String::as_str)
    }

    pub fn controls(&self) -> Vec<Control> {
        self.form
            .inputs
            .iter()
            .map(|input| Control {
                input_id: input.id.clone(),
                label: input.title.clone(),
                placeholder: input.placeholder.clone().unwrap_or_default(),
                html_type: input.input_type.as_str(),
                masked: input.input_type == InputType::Password,
                required: input.required,
            })
            .collect()
    }

    /// Record an answer. Returns false, and stores nothing, for an id the
    /// form does not have.
    pub fn set_answer(&mut self, input_id: &str, value: &str) -> bool {
        match self.answers.get_mut(input_id) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Titles of required inputs whose answer is blank, in form order.
    pub fn missing_required(&self) -> Vec<String> {
        self.form
            .inputs
            .iter()
            .filter(|i| i.required)
            .filter(|i| self.answer(&i.id).is_none_or(|v| v.trim().is_empty()))
            .map(|i| i.title.clone())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.state == ViewerState::Submitted {
            return Err(ViewerError::AlreadySubmitted);
        }
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ViewerError::MissingRequired(missing));
        }
        Ok(())
    }

    /// Post the answers once. Afterwards the viewer only shows a confirmation.
    pub async fn submit(&mut self, client: &FormServiceClient) -> Result<String, ViewerError> {
        self.validate()?;
        let message = client.submit(self.form.id, &self.answers).await?;
        self.state = ViewerState::Submitted;
        Ok(message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub input_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub response_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub cells: Vec<String>,
}

/// Responses laid out under the form's current inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTable {
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
}

impl ResponseTable {
    /// Rows keep the order they are given in; the API returns newest first.
    pub fn build(form: &Form, responses: &[FormResponse]) -> Self {
        let columns: Vec<Column> = form
            .inputs
            .iter()
            .map(|i| Column {
                input_id: i.id.clone(),
                title: if i.title.is_empty() {
                    UNTITLED_FIELD.to_string()
                } else {
                    i.title.clone()
                },
            })
            .collect();

        let rows = responses
            .iter()
            .map(|r| TableRow {
                response_id: r.id,
                submitted_at: r.submitted_at,
                cells: columns
                    .iter()
                    .map(|c| match r.value_for(&c.input_id) {
                        Some(v) if !v.is_empty() => v.to_string(),
                        _ => MISSING_ANSWER.to_string(),
                    })
                    .collect(),
            })
            .collect();

        ResponseTable { columns, rows }
    }

    pub async fn load(client: &FormServiceClient, form_id: i64) -> Result<Self, ClientError> {
        let form = client.get_form(form_id).await?;
        let responses = client.list_responses(form_id).await?;
        Ok(Self::build(&form, &responses))
    }
}

/// Link a respondent opens to fill in a form.
pub fn share_link(app_base_url: &str, form_id: i64) -> String {
    format!("{}/form/{}", app_base_url.trim_end_matches('/'), form_id)
}
