use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A contact that tasks can be assigned to.
///
/// `tasks` is the denormalized inverse of `Task::assigned_to` and is kept
/// consistent by the sync routines in `ops::sync` whenever assignments
/// change. The display color and initials are chosen at creation and
/// persisted with the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Avatar color as `#RRGGBB`.
    #[serde(default)]
    pub color: String,
    #[serde(default, rename = "initial")]
    pub initials: String,
    /// Ids of tasks this contact is assigned to.
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl Contact {
    /// Create a contact with derived initials and a random display color.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        let initials = initials_of(&name);
        Contact {
            id: String::new(),
            name,
            email: email.into(),
            phone: None,
            color: random_color(),
            initials,
            tasks: Vec::new(),
        }
    }
}

/// Derive avatar initials from the first two words of a name.
pub fn initials_of(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.graphemes(true).next())
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters.to_uppercase()
    }
}

/// Pick a random `#RRGGBB` display color.
pub fn random_color() -> String {
    let value: u32 = rand::random_range(0..=0xFF_FF_FF);
    format!("#{value:06X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_first_two_words() {
        assert_eq!(initials_of("Ada Lovelace"), "AL");
        assert_eq!(initials_of("Prince"), "P");
        assert_eq!(initials_of("Jean Paul Sartre"), "JP");
        assert_eq!(initials_of("  "), "?");
        assert_eq!(initials_of("émile zola"), "ÉZ");
    }

    #[test]
    fn test_random_color_format() {
        let color = random_color();
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(u32::from_str_radix(&color[1..], 16).is_ok());
    }

    #[test]
    fn test_contact_wire_format() {
        let json = r#"{
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "555-0100",
            "color": "#2A3647",
            "initial": "AL",
            "tasks": ["t0001"]
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.initials, "AL");
        assert_eq!(contact.tasks, vec!["t0001"]);

        let back = serde_json::to_value(&contact).unwrap();
        // Wire field name matches the store schema.
        assert_eq!(back["initial"], "AL");
        assert!(back.get("id").is_none());
    }
}
