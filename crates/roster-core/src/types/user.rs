//! User profile record.

use serde::{Deserialize, Serialize};

use super::{Coordinates, UserId};

/// A person's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub first: String,
    pub last: String,
}

/// Where a user lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub coordinates: Coordinates,
}

/// How to reach a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
}

/// Profile picture URLs in three sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pictures {
    pub thumbnail: String,
    pub medium: String,
    pub large: String,
}

/// One user profile.
///
/// The `id` is immutable and is the natural key for cache upserts; a later
/// fetch returning the same id replaces every other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: Name,
    pub gender: String,
    pub address: Address,
    pub contact: Contact,
    /// Date of birth as delivered by the source (ISO 8601).
    pub date_of_birth: String,
    pub age: u32,
    pub pictures: Pictures,
}

impl UserRecord {
    /// Returns `"first last"`, the string searches match against.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.first, self.name.last)
    }

    /// Case-insensitive substring match over the full name.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.full_name().to_lowercase().contains(needle)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A record with a predictable id and name for tests.
    pub fn user(id: &str, first: &str, last: &str) -> UserRecord {
        UserRecord {
            id: UserId::new(id).unwrap(),
            name: Name {
                first: first.to_string(),
                last: last.to_string(),
            },
            gender: "female".to_string(),
            address: Address {
                city: "Tauranga".to_string(),
                state: "Bay of Plenty".to_string(),
                country: "New Zealand".to_string(),
                coordinates: Coordinates::new(-37.68, 176.16).unwrap(),
            },
            contact: Contact {
                email: format!("{}.{}@example.com", first, last).to_lowercase(),
                phone: "(555) 010-0000".to_string(),
            },
            date_of_birth: "1990-04-12T08:30:00.000Z".to_string(),
            age: 34,
            pictures: Pictures {
                thumbnail: "https://example.com/t.jpg".to_string(),
                medium: "https://example.com/m.jpg".to_string(),
                large: "https://example.com/l.jpg".to_string(),
            },
        }
    }
}
