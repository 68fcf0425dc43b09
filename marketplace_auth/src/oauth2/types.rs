use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::errors::OAuth2Error;

/// Client surface a flow was started from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginMarker {
    App,
}

impl OriginMarker {
    /// Marker selected by the `from` query parameter of the setup request
    pub fn from_query(from: Option<&str>) -> Option<Self> {
        match from {
            Some("app") => Some(Self::App),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "fromapp",
        }
    }
}

impl FromStr for OriginMarker {
    type Err = OAuth2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fromapp" => Ok(Self::App),
            _ => Err(OAuth2Error::InvalidState(format!("Unknown origin marker: {s}"))),
        }
    }
}

/// Anti-forgery state carried in the `state` cookie and the provider's
/// `state` query parameter.
///
/// Encoded as `<random_id>` or `<random_id>,<marker>`. The random part is a
/// hyphenated UUID v4 and therefore never contains the `,` delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateToken {
    random_id: String,
    origin: Option<OriginMarker>,
}

impl StateToken {
    pub fn generate(origin: Option<OriginMarker>) -> Self {
        Self {
            random_id: uuid::Uuid::new_v4().hyphenated().to_string(),
            origin,
        }
    }

    pub fn random_id(&self) -> &str {
        &self.random_id
    }

    pub fn origin(&self) -> Option<OriginMarker> {
        self.origin
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            Some(marker) => write!(f, "{},{}", self.random_id, marker.as_str()),
            None => f.write_str(&self.random_id),
        }
    }
}

impl FromStr for StateToken {
    type Err = OAuth2Error;

    /// Unknown markers decode as no origin.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (random_id, marker) = match s.split_once(',') {
            Some((random_id, rest)) => (random_id, rest.split(',').next()),
            None => (s, None),
        };

        if random_id.is_empty() {
            return Err(OAuth2Error::InvalidState(
                "State has an empty random component".to_string(),
            ));
        }

        Ok(Self {
            random_id: random_id.to_string(),
            origin: marker.and_then(|m| m.parse().ok()),
        })
    }
}

/// Token endpoint response, either JSON or form encoded
#[derive(Debug, Default, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: Option<String>,
    pub(super) token_type: Option<String>,
    pub(super) scope: Option<String>,
    pub(super) error: Option<String>,
    pub(super) error_description: Option<String>,
}

impl TokenResponse {
    pub(super) fn from_form(body: &str) -> Self {
        let mut response = Self::default();
        for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
            let value = Some(value.into_owned());
            match key.as_ref() {
                "access_token" => response.access_token = value,
                "token_type" => response.token_type = value,
                "scope" => response.scope = value,
                "error" => response.error = value,
                "error_description" => response.error_description = value,
                _ => {}
            }
        }
        response
    }
}
