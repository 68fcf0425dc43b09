use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marketplace_auth::{AuthState, DataStore, OAuth2Params, SqliteDataStore};

/// Router state with provider endpoints on the mock server and an
/// in-memory store
pub(crate) fn test_state(server: &MockServer) -> AuthState {
    let mut params = OAuth2Params::new("id", "secret", "https://auth.example.com/api/callback");
    params.token_url = format!("{}/login/oauth/access_token", server.uri());
    params.marketplace_url = format!("{}/user/marketplace_purchases", server.uri());

    let store: Arc<dyn DataStore> = Arc::new(SqliteDataStore::in_memory().unwrap());
    AuthState::new(params, store)
}

pub(crate) async fn mount_token(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub(crate) async fn mount_purchases(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/user/marketplace_purchases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub(crate) async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Value of the named cookie in the response's `Set-Cookie` headers
pub(crate) fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| {
            v.split(';')
                .next()
                .and_then(|pair| pair.strip_prefix(&prefix))
                .map(str::to_string)
        })
}

pub(crate) async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
