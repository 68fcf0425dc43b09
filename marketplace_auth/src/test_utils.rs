use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::oauth2::OAuth2Params;

pub(crate) const TOKEN_PATH: &str = "/login/oauth/access_token";
pub(crate) const MARKETPLACE_PATH: &str = "/user/marketplace_purchases";

/// Parameters whose token and marketplace endpoints point at the mock server
pub(crate) fn params_for(server: &MockServer) -> OAuth2Params {
    let mut params = OAuth2Params::new("id", "secret", "https://auth.example.com/api/callback");
    params.token_url = format!("{}{TOKEN_PATH}", server.uri());
    params.marketplace_url = format!("{}{MARKETPLACE_PATH}", server.uri());
    params
}

pub(crate) async fn mount_token(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub(crate) async fn mount_purchases(server: &MockServer, purchases: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(MARKETPLACE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(purchases))
        .mount(server)
        .await;
}

pub(crate) fn purchase(id: i64, login: &str, plan_id: i64) -> serde_json::Value {
    json!({
        "billing_cycle": "monthly",
        "account": { "id": id, "login": login, "type": "User" },
        "plan": { "id": plan_id, "name": "Free" }
    })
}
