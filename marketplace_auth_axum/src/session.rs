use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::Redirect,
    routing::get,
};
use axum_extra::{TypedHeader, headers};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use marketplace_auth::{
    AuthState, CoordinationError, TOKEN_COOKIE_NAME, is_authenticated, prepare_signout,
};

use super::error::IntoResponseError;

pub(super) fn router(webhost: &str) -> Router<AuthState> {
    Router::new()
        .route(
            "/isauthenticated",
            get(is_authenticated_handler).layer(cors_layer(webhost)),
        )
        .route("/signout", get(signout))
}

/// Lets the web application read the login status with credentials
fn cors_layer(webhost: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_credentials(true);

    match HeaderValue::from_str(webhost.trim_end_matches('/')) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!("Webhost {:?} is not a valid origin: {}", webhost, e);
            cors
        }
    }
}

#[derive(Serialize)]
struct AuthStatus {
    result: bool,
}

async fn is_authenticated_handler(
    cookies: Option<TypedHeader<headers::Cookie>>,
) -> Json<AuthStatus> {
    let token = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| cookies.get(TOKEN_COOKIE_NAME));

    Json(AuthStatus {
        result: is_authenticated(token),
    })
}

async fn signout(
    State(state): State<AuthState>,
) -> Result<(HeaderMap, Redirect), (StatusCode, String)> {
    let (location, headers) = prepare_signout(&state.params)
        .map_err(CoordinationError::from)
        .into_response_error()?;

    Ok((headers, Redirect::to(&location)))
}

#[cfg(test)]
mod tests {
    use crate::router::marketplace_auth_router_no_trace;
    use crate::test_utils::{body_json, send, set_cookie_value, test_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_is_authenticated_with_token() {
        let server = MockServer::start().await;
        let app = marketplace_auth_router_no_trace(test_state(&server));

        let response = send(&app, "GET", "/isauthenticated", Some("token=gho_abc")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"result": true}));
    }

    #[tokio::test]
    async fn test_is_authenticated_without_token() {
        let server = MockServer::start().await;
        let app = marketplace_auth_router_no_trace(test_state(&server));

        let response = send(&app, "GET", "/isauthenticated", Some("state=abc")).await;
        assert_eq!(body_json(response).await, json!({"result": false}));

        let response = send(&app, "GET", "/isauthenticated", None).await;
        assert_eq!(body_json(response).await, json!({"result": false}));
    }

    #[tokio::test]
    async fn test_is_authenticated_allows_webhost_with_credentials() {
        let server = MockServer::start().await;
        let app = marketplace_auth_router_no_trace(test_state(&server));

        let request = Request::builder()
            .uri("/isauthenticated")
            .header(header::ORIGIN, "http://localhost:8888")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8888"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[tokio::test]
    async fn test_signout_expires_token() {
        let server = MockServer::start().await;
        let app = marketplace_auth_router_no_trace(test_state(&server));

        let response = send(&app, "GET", "/signout", Some("token=gho_abc")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "http://localhost:8888/app");
        assert_eq!(set_cookie_value(&response, "token").as_deref(), Some("deleted"));

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }
}
