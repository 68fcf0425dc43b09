use http::header::{ACCEPT, CONTENT_TYPE};

use crate::oauth2::config::OAuth2Params;
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::TokenResponse;
use crate::utils::http_client;

/// Exchanges an authorization code for an access token.
///
/// An `error` field in the response is a failure whatever the HTTP status
/// says. A response with neither `error` nor `access_token` is a failure too.
pub async fn exchange_code_for_token(
    params: &OAuth2Params,
    code: &str,
    state: &str,
) -> Result<String, OAuth2Error> {
    let response = http_client()
        .post(params.token_url.as_str())
        .header(ACCEPT, "application/json")
        .form(&[
            ("client_id", params.client_id.as_str()),
            ("client_secret", params.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", params.redirect_uri.as_str()),
            ("state", state),
        ])
        .send()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    let token_response = parse_token_response(&content_type, &response_body)?;

    if let Some(error) = &token_response.error {
        tracing::error!("TokenResponse: {}", response_body);
        tracing::debug!(
            "Token error {}: {:?}",
            error,
            token_response.error_description
        );
        return Err(OAuth2Error::ProviderError(response_body));
    }

    if !status.is_success() {
        tracing::error!("TokenResponse ({}): {}", status, response_body);
        return Err(OAuth2Error::TokenExchange(format!(
            "{status}: {response_body}"
        )));
    }

    match token_response.access_token.filter(|t| !t.is_empty()) {
        Some(access_token) => {
            tracing::debug!(
                "Token exchange succeeded: token_type={:?}, scope={:?}",
                token_response.token_type,
                token_response.scope
            );
            Ok(access_token)
        }
        None => {
            tracing::error!("TokenResponse without access_token: {}", response_body);
            Err(OAuth2Error::AccessTokenMissing(response_body))
        }
    }
}

fn parse_token_response(content_type: &str, body: &str) -> Result<TokenResponse, OAuth2Error> {
    if content_type.contains("json") || body.trim_start().starts_with('{') {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!("Failed to parse token response: {}: {}", e, body);
            OAuth2Error::TokenExchange(format!("Failed to parse token response: {e}"))
        })
    } else {
        Ok(TokenResponse::from_form(body))
    }
}
