//! randomuser.me-backed user source.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use roster_core::Result;
use roster_core::error::ParseError;
use roster_core::traits::UserSource;
use roster_core::types::{
    Address, Contact, Coordinates, Name, Pictures, ServiceUrl, UserId, UserRecord,
};

use crate::client::HttpClient;

/// Public randomuser.me endpoint.
pub const DEFAULT_USER_API: &str = "https://randomuser.me";

/// Records requested per batch when the caller has no preference.
pub const DEFAULT_BATCH_SIZE: usize = 100;

const WHAT: &str = "user batch";

#[derive(Debug, Deserialize)]
struct BatchResponse {
    results: Vec<ApiUser>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    login: ApiLogin,
    gender: String,
    name: ApiName,
    location: ApiLocation,
    email: String,
    dob: ApiDob,
    phone: String,
    picture: ApiPicture,
}

#[derive(Debug, Deserialize)]
struct ApiLogin {
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct ApiName {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    city: String,
    state: String,
    country: String,
    coordinates: ApiCoordinates,
}

#[derive(Debug, Deserialize)]
struct ApiCoordinates {
    latitude: Degrees,
    longitude: Degrees,
}

/// The API sends coordinates as strings; accept bare numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn parse(&self, field: &'static str) -> Result<f64> {
        match self {
            Degrees::Number(value) => Ok(*value),
            Degrees::Text(text) => text.trim().parse().map_err(|_| {
                ParseError::InvalidValue {
                    what: WHAT,
                    field,
                    value: text.clone(),
                }
                .into()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiDob {
    date: String,
    age: u32,
}

#[derive(Debug, Deserialize)]
struct ApiPicture {
    large: String,
    medium: String,
    thumbnail: String,
}

impl TryFrom<ApiUser> for UserRecord {
    type Error = roster_core::Error;

    fn try_from(api: ApiUser) -> Result<Self> {
        let id = UserId::new(&api.login.uuid).map_err(|_| ParseError::InvalidValue {
            what: WHAT,
            field: "login.uuid",
            value: api.login.uuid.clone(),
        })?;

        let latitude = api.location.coordinates.latitude.parse("location.coordinates.latitude")?;
        let longitude = api
            .location
            .coordinates
            .longitude
            .parse("location.coordinates.longitude")?;
        let coordinates =
            Coordinates::new(latitude, longitude).map_err(|_| ParseError::InvalidValue {
                what: WHAT,
                field: "location.coordinates",
                value: format!("{}, {}", latitude, longitude),
            })?;

        Ok(UserRecord {
            id,
            name: Name {
                first: api.name.first,
                last: api.name.last,
            },
            gender: api.gender,
            address: Address {
                city: api.location.city,
                state: api.location.state,
                country: api.location.country,
                coordinates,
            },
            contact: Contact {
                email: api.email,
                phone: api.phone,
            },
            date_of_birth: api.dob.date,
            age: api.dob.age,
            pictures: Pictures {
                thumbnail: api.picture.thumbnail,
                medium: api.picture.medium,
                large: api.picture.large,
            },
        })
    }
}

/// A [`UserSource`] reading batches from a randomuser.me-compatible API.
#[derive(Debug, Clone)]
pub struct RandomUserSource {
    client: HttpClient,
    base: ServiceUrl,
    batch_size: usize,
}

impl RandomUserSource {
    pub fn new(client: HttpClient, base: ServiceUrl, batch_size: usize) -> Self {
        Self {
            client,
            base,
            batch_size,
        }
    }

    pub fn base(&self) -> &ServiceUrl {
        &self.base
    }
}

#[async_trait]
impl UserSource for RandomUserSource {
    #[instrument(skip(self), fields(base = %self.base, batch_size = self.batch_size))]
    async fn fetch_batch(&self) -> Result<Vec<UserRecord>> {
        let url = self.base.endpoint("api/");
        let response: BatchResponse = self
            .client
            .get_json(&url, &[("results", self.batch_size)], WHAT)
            .await?;

        let users = response
            .results
            .into_iter()
            .map(UserRecord::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!(count = users.len(), "Fetched user batch");
        Ok(users)
    }
}
