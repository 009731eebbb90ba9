//! JSON-over-HTTP client shared by the sources.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use roster_core::Result;
use roster_core::error::{Error, ParseError, ProtocolError, TransportError};

/// Error body shapes used by the services we talk to.
///
/// randomuser.me sends `{"error": "..."}`, OpenWeatherMap sends
/// `{"cod": 401, "message": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// HTTP client for JSON GET requests.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client identifying itself as `roster/<version>`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self { client })
    }

    /// GET `url` with `query` parameters and decode the JSON body.
    ///
    /// `what` names the payload in parse errors.
    #[instrument(skip(self, query))]
    pub async fn get_json<Q, R>(&self, url: &str, query: &Q, what: &'static str) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("HTTP GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        trace!(status = %status, "HTTP response");

        if !status.is_success() {
            return Err(Error::Protocol(parse_error_response(response).await));
        }

        let body = response.bytes().await.map_err(map_reqwest)?;
        serde_json::from_slice(&body).map_err(|e| {
            ParseError::Malformed {
                what,
                message: e.to_string(),
            }
            .into()
        })
    }
}

async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
    let status = response.status().as_u16();

    match response.json::<ErrorBody>().await {
        Ok(body) => ProtocolError::new(status, body.message.or(body.error)),
        Err(_) => ProtocolError::new(status, None),
    }
}

/// Classify a reqwest failure as a transport error.
pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
