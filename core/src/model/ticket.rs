use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketType {
    Forum,
    Chat,
}

impl Default for TicketType {
    fn default() -> Self {
        TicketType::Forum
    }
}

impl TicketType {
    pub fn toggle(self) -> Self {
        match self {
            TicketType::Forum => TicketType::Chat,
            TicketType::Chat => TicketType::Forum,
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketType::Forum => write!(f, "Forum"),
            TicketType::Chat => write!(f, "Chat"),
        }
    }
}

impl FromStr for TicketType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f" | "forum" => Ok(TicketType::Forum),
            "c" | "chat" => Ok(TicketType::Chat),
            other => Err(anyhow!("Unknown ticket type: '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub kind: TicketType,
    /// Local wall-clock time the ticket was recorded.
    pub date: NaiveDateTime,
}

impl Ticket {
    pub fn new(title: String, kind: TicketType, date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            kind,
            date,
        }
    }

    /// First eight characters of the id, as shown in listings.
    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}

/// Turns a ticket URL into a readable title using its last path segment:
/// `.../how-to-reset-password` becomes `How To Reset Password`.
pub fn derive_title(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let slug = url.split('/').filter(|s| !s.is_empty()).last()?;
    let words: Vec<String> = slug
        .split('-')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title_from_slug() {
        assert_eq!(
            derive_title("https://forum.example.com/t/cannot-login-after-update"),
            Some("Cannot Login After Update".to_string())
        );
        assert_eq!(
            derive_title("https://forum.example.com/t/cannot-login/"),
            Some("Cannot Login".to_string())
        );
        assert_eq!(derive_title("  single  "), Some("Single".to_string()));
    }

    #[test]
    fn test_derive_title_blank_is_none() {
        assert_eq!(derive_title(""), None);
        assert_eq!(derive_title("   "), None);
        assert_eq!(derive_title("///"), None);
    }

    #[test]
    fn test_ticket_type_parse() {
        assert_eq!("chat".parse::<TicketType>().unwrap(), TicketType::Chat);
        assert_eq!("F".parse::<TicketType>().unwrap(), TicketType::Forum);
        assert!("email".parse::<TicketType>().is_err());
        assert_eq!(TicketType::Forum.toggle(), TicketType::Chat);
    }
}
