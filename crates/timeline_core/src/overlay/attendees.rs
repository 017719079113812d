//! Wiki-link formatting for calendar events.

use serde::{Deserialize, Serialize};

/// Event attendee as reported by a calendar source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Attendee {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Display name, or a title-cased name derived from the email local part
/// (`john.doe@example.com` -> `John Doe`).
pub fn attendee_name(email: &str, display_name: Option<&str>) -> String {
    if let Some(name) = display_name.map(str::trim).filter(|name| !name.is_empty()) {
        return name.to_string();
    }

    let local_part = email.split('@').next().unwrap_or_default();
    local_part
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins attendees as `[[A]]`, `[[A]] and [[B]]`, `[[A]], [[B]] and [[C]]`.
pub fn format_attendees(attendees: &[Attendee]) -> String {
    let links = attendees
        .iter()
        .map(|attendee| {
            format!(
                "[[{}]]",
                attendee_name(&attendee.email, attendee.display_name.as_deref())
            )
        })
        .collect::<Vec<_>>();

    match links.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}

/// `- <title> with <attendees>`, without the bullet when `include_bullet`
/// is false and without the `with` clause when there are no attendees.
pub fn format_event_bullet(title: &str, attendees: &[Attendee], include_bullet: bool) -> String {
    let formatted = format_attendees(attendees);
    let content = if formatted.is_empty() {
        title.to_string()
    } else {
        format!("{title} with {formatted}")
    };

    if include_bullet {
        format!("- {content}")
    } else {
        content
    }
}

fn title_case(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
