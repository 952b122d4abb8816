use std::fmt;

use super::sequence::{InputSequence, OutOfRange};
use super::service::{ClientError, FormServiceClient};
use crate::models::form::{DEFAULT_TITLE, Form, FormRequest, InputDraft, InputType};

/// Most inputs a single form may hold.
pub const MAX_INPUTS: usize = 20;

const TEMP_ID_PREFIX: &str = "tmp-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    TooManyInputs,
    MissingTitle,
    OutOfRange(OutOfRange),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::TooManyInputs => write!(f, "Maximum of {MAX_INPUTS} inputs allowed"),
            EditorError::MissingTitle => write!(f, "Input title is required"),
            EditorError::OutOfRange(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<OutOfRange> for EditorError {
    fn from(e: OutOfRange) -> Self {
        EditorError::OutOfRange(e)
    }
}

/// An input while it is being authored. Unsaved inputs carry a temporary id.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftInput {
    pub id: String,
    pub input_type: InputType,
    pub title: String,
    pub placeholder: String,
    pub required: bool,
}

impl DraftInput {
    /// True until the input has been saved and given a server id.
    pub fn is_unsaved(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }

    /// Unsaved inputs go out without an id so the server assigns one.
    fn to_request_input(&self) -> InputDraft {
        InputDraft {
            id: (!self.is_unsaved()).then(|| self.id.clone()),
            input_type: self.input_type,
            title: self.title.clone(),
            placeholder: if self.placeholder.is_empty() {
                None
            } else {
                Some(self.placeholder.clone())
            },
            required: self.required,
        }
    }
}

/// In-memory draft of a form being built or edited.
#[derive(Debug, Clone)]
pub struct FormEditor {
    form_id: Option<i64>,
    title: String,
    inputs: InputSequence<DraftInput>,
    next_temp_id: u64,
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEditor {
    /// Empty draft for a new form.
    pub fn new() -> Self {
        FormEditor {
            form_id: None,
            title: DEFAULT_TITLE.to_string(),
            inputs: InputSequence::new(),
            next_temp_id: 1,
        }
    }

    /// Draft preloaded from a saved form; saving it updates that form.
    pub fn from_form(form: &Form) -> Self {
        let inputs = form
            .inputs
            .iter()
            .map(|f| DraftInput {
                id: f.id.clone(),
                input_type: f.input_type,
                title: f.title.clone(),
                placeholder: f.placeholder.clone().unwrap_or_default(),
                required: f.required,
            })
            .collect::<Vec<_>>();
        FormEditor {
            form_id: Some(form.id),
            title: form.title.clone(),
            inputs: InputSequence::from(inputs),
            next_temp_id: 1,
        }
    }

    pub fn form_id(&self) -> Option<i64> {
        self.form_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn inputs(&self) -> &InputSequence<DraftInput> {
        &self.inputs
    }

    /// Append an input. Refused once the draft holds [`MAX_INPUTS`] inputs or
    /// when the title is blank; a refused call leaves the draft unchanged.
    pub fn add_input(
        &mut self,
        input_type: InputType,
        title: &str,
        placeholder: &str,
    ) -> Result<&DraftInput, EditorError> {
        if self.inputs.len() >= MAX_INPUTS {
            return Err(EditorError::TooManyInputs);
        }
        if title.trim().is_empty() {
            return Err(EditorError::MissingTitle);
        }
        let id = format!("{TEMP_ID_PREFIX}{}", self.next_temp_id);
        self.next_temp_id += 1;
        Ok(self.inputs.push(DraftInput {
            id,
            input_type,
            title: title.to_string(),
            placeholder: placeholder.to_string(),
            required: false,
        }))
    }

    /// Rewrite the input at `index` in place, keeping its id and required flag.
    pub fn edit_input(
        &mut self,
        index: usize,
        input_type: InputType,
        title: &str,
        placeholder: &str,
    ) -> Result<(), EditorError> {
        if title.trim().is_empty() {
            return Err(EditorError::MissingTitle);
        }
        let current = self.inputs.get(index).cloned().ok_or(OutOfRange {
            index,
            len: self.inputs.len(),
        })?;
        self.inputs.replace(
            index,
            DraftInput {
                input_type,
                title: title.to_string(),
                placeholder: placeholder.to_string(),
                ..current
            },
        )?;
        Ok(())
    }

    pub fn set_required(&mut self, index: usize, required: bool) -> Result<(), EditorError> {
        let current = self.inputs.get(index).cloned().ok_or(OutOfRange {
            index,
            len: self.inputs.len(),
        })?;
        self.inputs.replace(index, DraftInput { required, ..current })?;
        Ok(())
    }

    pub fn remove_input(&mut self, index: usize) -> Result<DraftInput, EditorError> {
        Ok(self.inputs.remove(index)?)
    }

    /// Drag-and-drop: move the input at `from` so it ends up at `to`.
    pub fn move_input(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        Ok(self.inputs.move_item(from, to)?)
    }

    /// The whole draft as a create/update body.
    pub fn to_request(&self) -> FormRequest {
        FormRequest {
            title: Some(self.title.clone()),
            inputs: Some(self.inputs.iter().map(DraftInput::to_request_input).collect()),
        }
    }

    /// Persist the draft: create for a new draft, update for a loaded form.
    /// On success the draft adopts the server's ids.
    pub async fn save(&mut self, client: &FormServiceClient) -> Result<Form, ClientError> {
        let request = self.to_request();
        let saved = match self.form_id {
            Some(id) => client.update_form(id, &request).await?,
            None => client.create_form(&request).await?,
        };
        let next_temp_id = self.next_temp_id;
        *self = FormEditor::from_form(&saved);
        self.next_temp_id = next_temp_id;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::InputField;

    #[test]
    fn new_draft_uses_default_title() {
        let editor = FormEditor::new();
        assert_eq!(editor.title(), DEFAULT_TITLE);
        assert!(editor.inputs().is_empty());
        assert!(editor.form_id().is_none());
    }

    #[test]
    fn add_requires_title() {
        let mut editor = FormEditor::new();
        assert_eq!(
            editor.add_input(InputType::Text, "  ", "").unwrap_err(),
            EditorError::MissingTitle
        );
        assert!(editor.inputs().is_empty());
    }

    #[test]
    fn cap_of_twenty_inputs() {
        let mut editor = FormEditor::new();
        for i in 0..MAX_INPUTS {
            editor.add_input(InputType::Text, &format!("Q{i}"), "").unwrap();
        }
        let err = editor.add_input(InputType::Email, "One too many", "").unwrap_err();
        assert_eq!(err, EditorError::TooManyInputs);
        assert_eq!(err.to_string(), "Maximum of 20 inputs allowed");
        assert_eq!(editor.inputs().len(), MAX_INPUTS);
    }

    #[test]
    fn temp_ids_are_unique() {
        let mut editor = FormEditor::new();
        let a = editor.add_input(InputType::Text, "A", "").unwrap().id.clone();
        let added = editor.add_input(InputType::Text, "B", "hint").unwrap();
        assert_eq!(added.title, "B");
        assert_eq!(added.placeholder, "hint");
        let b = added.id.clone();
        assert_ne!(a, b);
        assert_eq!(editor.inputs().get(1).map(|i| i.id.as_str()), Some(b.as_str()));
    }

    #[test]
    fn edit_keeps_id_and_position() {
        let mut editor = FormEditor::new();
        editor.add_input(InputType::Text, "Name", "Your name").unwrap();
        editor.add_input(InputType::Text, "Mail", "").unwrap();
        let id = editor.inputs().get(1).unwrap().id.clone();

        editor.edit_input(1, InputType::Email, "Email", "you@example.com").unwrap();
        let edited = editor.inputs().get(1).unwrap();
        assert_eq!(edited.id, id);
        assert_eq!(edited.input_type, InputType::Email);
        assert_eq!(edited.placeholder, "you@example.com");

        assert_eq!(
            editor.edit_input(1, InputType::Email, "", "").unwrap_err(),
            EditorError::MissingTitle
        );
        assert!(matches!(
            editor.edit_input(7, InputType::Text, "x", ""),
            Err(EditorError::OutOfRange(_))
        ));
    }

    #[test]
    fn move_and_remove_by_position() {
        let mut editor = FormEditor::new();
        for t in ["A", "B", "C"] {
            editor.add_input(InputType::Text, t, "").unwrap();
        }
        editor.move_input(2, 0).unwrap();
        let titles: Vec<_> = editor.inputs().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);

        let removed = editor.remove_input(1).unwrap();
        assert_eq!(removed.title, "A");
        assert!(editor.move_input(0, 5).is_err());
        assert_eq!(editor.inputs().len(), 2);
    }

    #[test]
    fn request_carries_whole_draft_in_order() {
        let mut editor = FormEditor::new();
        editor.set_title("Survey");
        editor.add_input(InputType::Text, "Name", "").unwrap();
        editor.add_input(InputType::Email, "Email", "a@b.c").unwrap();
        editor.set_required(0, true).unwrap();

        let req = editor.to_request();
        assert_eq!(req.title.as_deref(), Some("Survey"));
        let inputs = req.inputs.unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].input_type, InputType::Text);
        assert!(inputs[0].required);
        assert!(inputs[0].placeholder.is_none());
        assert!(inputs.iter().all(|i| i.id.is_none()));
        assert_eq!(inputs[1].placeholder.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn loaded_form_keeps_server_ids() {
        let now = crate::models::now_utc();
        let form = Form {
            id: 42,
            title: "Feedback".into(),
            inputs: vec![InputField {
                id: "srv-1".into(),
                input_type: InputType::Number,
                title: "Score".into(),
                placeholder: Some("1-10".into()),
                required: true,
                order: 0,
            }],
            created_at: now,
            updated_at: now,
        };
        let editor = FormEditor::from_form(&form);
        assert_eq!(editor.form_id(), Some(42));
        let req = editor.to_request();
        let inputs = req.inputs.unwrap();
        assert_eq!(inputs[0].id.as_deref(), Some("srv-1"));
        assert!(inputs[0].required);
    }
}
