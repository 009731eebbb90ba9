//! User identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated user identifier.
///
/// Identifiers come from the remote source (`login.uuid`) and double as the
/// cache key and the sort key for paginated listing. Because they are also
/// used as file names by filesystem caches, the character set is restricted.
///
/// # Example
///
/// ```
/// use roster_core::UserId;
///
/// let id = UserId::new("4f1c2b9e-6a0d-4c51-9d6e-0b6f3a1c7e22").unwrap();
/// assert_eq!(id.as_str(), "4f1c2b9e-6a0d-4c51-9d6e-0b6f3a1c7e22");
/// assert!(UserId::new("../etc/passwd").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Maximum identifier length.
    pub const MAX_LEN: usize = 128;

    /// Create a new user id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, too long, `.`/`..`, or
    /// contains characters other than ASCII alphanumerics, `-`, `_` and `.`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let reject = |reason: String| -> Result<(), Error> {
            Err(InvalidInputError::UserId {
                value: s.to_string(),
                reason,
            }
            .into())
        };

        if s.is_empty() {
            return reject("cannot be empty".to_string());
        }

        if s.len() > Self::MAX_LEN {
            return reject(format!(
                "exceeds maximum length of {} characters",
                Self::MAX_LEN
            ));
        }

        if s == "." || s == ".." {
            return reject("cannot be '.' or '..'".to_string());
        }

        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '.' && *c != '-' && *c != '_')
        {
            return reject(format!("contains invalid character '{}'", c));
        }

        Ok(())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
