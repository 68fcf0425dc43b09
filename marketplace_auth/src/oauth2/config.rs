use std::env;
use url::Url;

use super::errors::OAuth2Error;

/// Name of the cookie carrying the state token between setup and callback
pub const STATE_COOKIE_NAME: &str = "state";

const DEFAULT_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
const DEFAULT_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const DEFAULT_MARKETPLACE_URL: &str = "https://api.github.com/user/marketplace_purchases";
const DEFAULT_MARKETPLACE_USER_AGENT: &str = "IMGBOT";
const DEFAULT_WEBHOST: &str = "http://localhost:8888";
const DEFAULT_LANDING_PATH: &str = "/winning";
const DEFAULT_APP_LANDING_PATH: &str = "/app";

/// Provider secrets and endpoints for one deployment.
#[derive(Clone, Debug)]
pub struct OAuth2Params {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub marketplace_url: String,
    /// The provider rejects API calls without a `User-Agent`.
    pub marketplace_user_agent: String,
    /// Origin of the web application the browser is sent back to.
    pub webhost: String,
    pub landing_path: String,
    pub app_landing_path: String,
    pub state_cookie_max_age: i64,
    pub token_cookie_max_age: i64,
    pub cookie_secure: bool,
}

impl OAuth2Params {
    /// Parameters with the public provider endpoints and default landing paths
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            marketplace_url: DEFAULT_MARKETPLACE_URL.to_string(),
            marketplace_user_agent: DEFAULT_MARKETPLACE_USER_AGENT.to_string(),
            webhost: DEFAULT_WEBHOST.to_string(),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
            app_landing_path: DEFAULT_APP_LANDING_PATH.to_string(),
            state_cookie_max_age: 600,
            token_cookie_max_age: 60 * 60 * 24 * 30,
            cookie_secure: true,
        }
    }

    /// Creates parameters from environment variables
    pub fn from_env() -> Result<Self, OAuth2Error> {
        dotenvy::dotenv().ok();

        let required = |key: &str| {
            env::var(key).map_err(|_| OAuth2Error::Config(format!("{key} must be set")))
        };
        let optional = |key: &str, default: &str| env::var(key).unwrap_or(default.to_string());
        let max_age = |key: &str, default: i64| {
            env::var(key)
                .map(|v| v.parse::<i64>())
                .unwrap_or(Ok(default))
                .map_err(|e| OAuth2Error::Config(format!("Invalid {key} value: {e}")))
        };

        let mut params = Self::new(
            required("OAUTH2_CLIENT_ID")?,
            required("OAUTH2_CLIENT_SECRET")?,
            required("OAUTH2_REDIRECT_URI")?,
        );

        params.auth_url = optional("OAUTH2_AUTH_URL", DEFAULT_AUTH_URL);
        params.token_url = optional("OAUTH2_TOKEN_URL", DEFAULT_TOKEN_URL);
        params.marketplace_url = optional("MARKETPLACE_PURCHASES_URL", DEFAULT_MARKETPLACE_URL);
        params.marketplace_user_agent =
            optional("MARKETPLACE_USER_AGENT", DEFAULT_MARKETPLACE_USER_AGENT);
        params.webhost = optional("WEBHOST", DEFAULT_WEBHOST)
            .trim_end_matches('/')
            .to_string();
        params.landing_path = optional("LANDING_PATH_DEFAULT", DEFAULT_LANDING_PATH);
        params.app_landing_path = optional("LANDING_PATH_APP", DEFAULT_APP_LANDING_PATH);
        params.state_cookie_max_age = max_age("STATE_COOKIE_MAX_AGE", 600)?;
        params.token_cookie_max_age = max_age("TOKEN_COOKIE_MAX_AGE", 60 * 60 * 24 * 30)?;
        params.cookie_secure = env::var("COOKIE_SECURE").map_or(Ok(true), |v| {
            match v.to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                invalid => Err(OAuth2Error::Config(format!(
                    "Invalid COOKIE_SECURE: {invalid}. Valid values are: true, false"
                ))),
            }
        })?;

        params.validate()?;
        Ok(params)
    }

    /// Validates the parameters
    pub fn validate(&self) -> Result<(), OAuth2Error> {
        if self.client_id.is_empty() {
            return Err(OAuth2Error::Config("Client ID cannot be empty".to_string()));
        }
        if self.client_secret.is_empty() {
            return Err(OAuth2Error::Config(
                "Client secret cannot be empty".to_string(),
            ));
        }
        if self.marketplace_user_agent.is_empty() {
            return Err(OAuth2Error::Config(
                "Marketplace user agent cannot be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("redirect_uri", &self.redirect_uri),
            ("auth_url", &self.auth_url),
            ("token_url", &self.token_url),
            ("marketplace_url", &self.marketplace_url),
            ("webhost", &self.webhost),
        ] {
            Url::parse(value)
                .map_err(|e| OAuth2Error::Config(format!("Invalid {name} {value:?}: {e}")))?;
        }
        for (name, value) in [
            ("landing_path", &self.landing_path),
            ("app_landing_path", &self.app_landing_path),
        ] {
            if !value.starts_with('/') {
                return Err(OAuth2Error::Config(format!(
                    "{name} must start with '/': {value:?}"
                )));
            }
        }
        if self.state_cookie_max_age <= 0 || self.token_cookie_max_age <= 0 {
            return Err(OAuth2Error::Config(
                "Cookie max age must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Where the browser lands after a plain login, or after any failure
    pub fn landing_url(&self) -> String {
        format!("{}{}", self.webhost, self.landing_path)
    }

    /// Where the browser lands when the flow was started from the app
    pub fn app_landing_url(&self) -> String {
        format!("{}{}", self.webhost, self.app_landing_path)
    }
}
