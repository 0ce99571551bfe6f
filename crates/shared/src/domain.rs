use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(UserId);

/// One row of the user listing. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl UserRecord {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, age: u32) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Case-insensitive, unanchored substring match on name or email.
    /// `needle_lower` must already be lowercased.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_serializes_as_plain_integer() {
        let record = UserRecord::new(7, "User 7", "user7@example.com", 33);
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(
            json,
            r#"{"id":7,"name":"User 7","email":"user7@example.com","age":33}"#
        );
    }

    #[test]
    fn matches_name_or_email_ignoring_case() {
        let record = UserRecord::new(12, "User 12", "USER12@Example.com", 40);
        assert!(record.matches_lowercase("user 1"));
        assert!(record.matches_lowercase("example.com"));
        assert!(record.matches_lowercase(""));
        assert!(!record.matches_lowercase("user13"));
    }
}
