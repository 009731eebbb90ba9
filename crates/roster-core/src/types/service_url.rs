//! Remote service base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for a remote service (user source, weather API).
///
/// Must use HTTPS, or HTTP when pointing at the local machine (test servers).
///
/// # Example
///
/// ```
/// use roster_core::ServiceUrl;
///
/// let api = ServiceUrl::new("https://randomuser.me/").unwrap();
/// assert_eq!(api.endpoint("api/"), "https://randomuser.me/api/");
/// assert!(ServiceUrl::new("http://randomuser.me").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Create a new service URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ServiceUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the absolute URL for a path below this base.
    pub fn endpoint(&self, path: &str) -> String {
        // Url keeps a trailing slash on root paths
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let reject = |reason: &str| -> Result<(), Error> {
            Err(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into())
        };

        if url.cannot_be_a_base() {
            return reject("must be an absolute URL");
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return reject("must use HTTPS (HTTP allowed only for localhost)");
        }

        if url.host_str().is_none() {
            return reject("must have a host");
        }

        Ok(())
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServiceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
