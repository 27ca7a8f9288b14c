//! Bot command menu, parsed from a `command - description` lines file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub command: String,
    pub description: String,
}

/// Ordered command list for the platform's menu endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMenu {
    pub entries: Vec<CommandEntry>,
}

impl CommandMenu {
    /// Lines split on ` - `; exactly two parts make an entry, any other
    /// shape is skipped.
    pub fn parse(text: &str) -> CommandMenu {
        let mut entries = Vec::new();
        for line in text.lines() {
            let parts: Vec<&str> = line.split(" - ").collect();
            if let [command, description] = parts[..] {
                entries.push(CommandEntry {
                    command: command.to_string(),
                    description: description.to_string(),
                });
            }
        }
        CommandMenu { entries }
    }

    pub fn load(path: &Path) -> Result<CommandMenu> {
        let text = std::fs::read_to_string(path)?;
        Ok(CommandMenu::parse(&text))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_part_lines_only() {
        let menu = CommandMenu::parse("start - Begin\njunk line\nhelp - Show help");
        assert_eq!(
            menu.entries,
            vec![
                CommandEntry {
                    command: "start".to_string(),
                    description: "Begin".to_string()
                },
                CommandEntry {
                    command: "help".to_string(),
                    description: "Show help".to_string()
                },
            ]
        );
    }

    #[test]
    fn skips_lines_with_extra_separators() {
        let menu = CommandMenu::parse("a - b - c");
        assert!(menu.is_empty());
    }

    #[test]
    fn empty_text_parses_to_empty_menu() {
        assert!(CommandMenu::parse("").is_empty());
    }
}
