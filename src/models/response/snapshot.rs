use std::collections::{BTreeMap, HashMap};

use super::types::AnswerSnapshot;
use crate::models::form::InputField;

/// Pair each non-empty answer with the current title of its input.
///
/// Answers for ids the form does not have are dropped. The title is copied,
/// not referenced, so renaming or removing an input later leaves stored
/// responses unchanged.
pub fn snapshot_answers(
    inputs: &[InputField],
    answers: &HashMap<String, String>,
) -> BTreeMap<String, AnswerSnapshot> {
    inputs
        .iter()
        .filter_map(|input| {
            let value = answers.get(&input.id)?;
            if value.is_empty() {
                return None;
            }
            Some((
                input.id.clone(),
                AnswerSnapshot {
                    value: value.clone(),
                    title: input.title.clone(),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::InputType;

    fn field(id: &str, title: &str) -> InputField {
        InputField {
            id: id.to_string(),
            input_type: InputType::Text,
            title: title.to_string(),
            placeholder: None,
            required: false,
            order: 0,
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn copies_title_next_to_value() {
        let inputs = vec![field("a", "Name"), field("b", "Email")];
        let snap = snapshot_answers(&inputs, &answers(&[("a", "Ada"), ("b", "ada@example.com")]));
        assert_eq!(snap.len(), 2);
        assert_eq!(snap["a"].title, "Name");
        assert_eq!(snap["a"].value, "Ada");
        assert_eq!(snap["b"].title, "Email");
    }

    #[test]
    fn empty_answers_are_skipped() {
        let inputs = vec![field("a", "Name"), field("b", "Email")];
        let snap = snapshot_answers(&inputs, &answers(&[("a", ""), ("b", "x@y.z")]));
        assert!(!snap.contains_key("a"));
        assert!(snap.contains_key("b"));
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let inputs = vec![field("a", "Name")];
        let snap = snapshot_answers(&inputs, &answers(&[("a", "Ada"), ("ghost", "boo")]));
        assert_eq!(snap.len(), 1);
        assert!(!snap.contains_key("ghost"));
    }

    #[test]
    fn whitespace_is_a_value() {
        let inputs = vec![field("a", "Name")];
        let snap = snapshot_answers(&inputs, &answers(&[("a", " ")]));
        assert_eq!(snap["a"].value, " ");
    }
}
