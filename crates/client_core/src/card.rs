//! Stateless card presentation for a single user record.

use std::borrow::Cow;

use shared::domain::{UserId, UserRecord};

pub const EMAIL_SLOT_CHARS: usize = 28;
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub label: &'static str,
    pub value: String,
    pub truncate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    pub id: UserId,
    pub fields: [CardField; 4],
}

pub fn render_card(record: &UserRecord) -> UserCard {
    UserCard {
        id: record.id,
        fields: [
            CardField {
                label: "ID",
                value: record.id.to_string(),
                truncate: false,
            },
            CardField {
                label: "Name",
                value: record.name.clone(),
                truncate: false,
            },
            CardField {
                label: "Email",
                value: record.email.clone(),
                truncate: true,
            },
            CardField {
                label: "Age",
                value: record.age.to_string(),
                truncate: false,
            },
        ],
    }
}

impl UserCard {
    /// Single-line text form; truncatable fields are cut to `slot_chars`.
    pub fn to_line(&self, slot_chars: usize) -> String {
        self.fields
            .iter()
            .map(|field| {
                let value = if field.truncate {
                    truncate_for_slot(&field.value, slot_chars)
                } else {
                    Cow::Borrowed(field.value.as_str())
                };
                format!("{}: {value}", field.label)
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

pub fn truncate_for_slot(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }
    if max_chars == 0 {
        return Cow::Borrowed("");
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push(ELLIPSIS);
    Cow::Owned(out)
}
