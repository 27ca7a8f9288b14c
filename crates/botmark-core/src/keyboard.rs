//! Keyboard grid assembly from the tokenizer's ordered button sequence.

use serde::{Deserialize, Serialize};

use crate::markup::buttons::ButtonSpec;

/// One pressable entry in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub label: String,
    pub action: String,
}

/// Ordered rows of buttons, matching marker order in the source text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl KeyboardLayout {
    /// Fold the ordered sequence into rows. A row break closes the current
    /// row even when it is empty (blank rows are allowed on purpose); the
    /// trailing open row is kept only when it has buttons.
    pub fn build(specs: &[ButtonSpec]) -> Self {
        let mut rows = Vec::new();
        let mut row = Vec::new();

        for spec in specs {
            match spec {
                ButtonSpec::Action { label, action } => row.push(KeyboardButton {
                    label: label.clone(),
                    action: action.clone(),
                }),
                ButtonSpec::RowBreak => rows.push(std::mem::take(&mut row)),
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(label: &str, action: &str) -> ButtonSpec {
        ButtonSpec::Action {
            label: label.to_string(),
            action: action.to_string(),
        }
    }

    #[test]
    fn builds_two_rows_around_a_break() {
        let layout = KeyboardLayout::build(&[
            action("a", "x"),
            ButtonSpec::RowBreak,
            action("b", "y"),
        ]);
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[0][0].label, "a");
        assert_eq!(layout.rows[1][0].action, "y");
    }

    #[test]
    fn trailing_break_leaves_no_empty_row() {
        let layout = KeyboardLayout::build(&[action("a", "x"), ButtonSpec::RowBreak]);
        assert_eq!(layout.rows, vec![vec![KeyboardButton {
            label: "a".to_string(),
            action: "x".to_string(),
        }]]);
    }

    #[test]
    fn leading_break_keeps_a_blank_row() {
        let layout = KeyboardLayout::build(&[ButtonSpec::RowBreak, action("a", "x")]);
        assert_eq!(layout.rows.len(), 2);
        assert!(layout.rows[0].is_empty());
        assert_eq!(layout.button_count(), 1);
    }

    #[test]
    fn no_specs_builds_empty_layout() {
        let layout = KeyboardLayout::build(&[]);
        assert!(layout.is_empty());
        assert_eq!(layout.button_count(), 0);
    }
}
