//! Choice options for dropdown, radio and checkbox fields

use super::ids::IdGenerator;
use serde::{Deserialize, Serialize};

/// One selectable choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: String,
    pub label: String,
    /// Stable machine token submitted for this choice
    pub value: String,
}

impl FieldOption {
    pub fn new(id: String, label: &str, value: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    /// Auto-numbered option, `Option {n}` / `option{n}`
    pub fn numbered(ids: &mut dyn IdGenerator, n: usize) -> Self {
        Self {
            id: ids.next_id(),
            label: format!("Option {n}"),
            value: format!("option{n}"),
        }
    }

    /// Set the label and derive the value from it. This is the only path
    /// that recomputes `value`.
    pub fn relabel(&mut self, label: &str) {
        self.label = label.to_string();
        self.value = value_from_label(label);
    }

    /// Shallow merge; fields missing from the patch keep their value
    pub fn merge(&mut self, patch: OptionPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
    }
}

/// Partial update of an option
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPatch {
    pub label: Option<String>,
    pub value: Option<String>,
}

/// Lowercase the label and collapse each whitespace run into one `_`.
///
/// Leading and trailing whitespace become underscores too, so `" A b"`
/// yields `"_a_b"`.
pub fn value_from_label(label: &str) -> String {
    let mut value = String::with_capacity(label.len());
    let mut in_space = false;
    for c in label.chars() {
        if c.is_whitespace() {
            if !in_space {
                value.push('_');
            }
            in_space = true;
        } else {
            value.extend(c.to_lowercase());
            in_space = false;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::sequential_ids;

    mod value_derivation {
        use super::*;

        #[test]
        fn test_lowercases_and_joins_words() {
            assert_eq!(value_from_label("Very Satisfied"), "very_satisfied");
        }

        #[test]
        fn test_collapses_whitespace_runs() {
            assert_eq!(value_from_label("Friend \t  Family"), "friend_family");
        }

        #[test]
        fn test_edge_whitespace_becomes_underscore() {
            assert_eq!(value_from_label("  Other "), "_other_");
        }

        #[test]
        fn test_empty_label() {
            assert_eq!(value_from_label(""), "");
        }
    }

    mod field_option {
        use super::*;

        #[test]
        fn test_numbered_option() {
            let mut ids = sequential_ids();
            let option = FieldOption::numbered(&mut ids, 3);
            assert_eq!(option.id, "id-1");
            assert_eq!(option.label, "Option 3");
            assert_eq!(option.value, "option3");
        }

        #[test]
        fn test_relabel_recomputes_value() {
            let mut option = FieldOption::new("o1".to_string(), "Option 1", "option1");
            option.relabel("Search Engine");
            assert_eq!(option.label, "Search Engine");
            assert_eq!(option.value, "search_engine");
        }

        #[test]
        fn test_merge_leaves_value_alone_on_label_change() {
            let mut option = FieldOption::new("o1".to_string(), "Option 1", "option1");
            option.merge(OptionPatch {
                label: Some("Renamed".to_string()),
                value: None,
            });
            assert_eq!(option.label, "Renamed");
            assert_eq!(option.value, "option1");
            assert_eq!(option.id, "o1");
        }
    }
}
