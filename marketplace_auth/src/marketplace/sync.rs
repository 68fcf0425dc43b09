use http::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::oauth2::OAuth2Params;
use crate::storage::DataStore;
use crate::utils::http_client;

use super::errors::MarketplaceError;
use super::storage::MarketplaceStore;
use super::types::{MarketplaceRecord, PlanData};

/// Fetches the user's marketplace purchases and upserts one record per
/// account. Returns the number of records written.
pub async fn sync_marketplace_purchases(
    params: &OAuth2Params,
    store: &dyn DataStore,
    access_token: &str,
) -> Result<usize, MarketplaceError> {
    let plan_data = fetch_marketplace_purchases(params, access_token).await?;
    tracing::debug!("Marketplace purchases: {:#?}", plan_data);

    let mut count = 0;
    for item in &plan_data {
        let stored = MarketplaceStore::upsert_record(store, MarketplaceRecord::from(item)).await?;
        tracing::info!(
            "Upserted marketplace record: account_id={}, login={}, plan_id={}",
            stored.account_id,
            stored.account_login,
            stored.plan_id
        );
        count += 1;
    }

    Ok(count)
}

async fn fetch_marketplace_purchases(
    params: &OAuth2Params,
    access_token: &str,
) -> Result<Vec<PlanData>, MarketplaceError> {
    let response = http_client()
        .get(params.marketplace_url.as_str())
        .header(AUTHORIZATION, format!("token {access_token}"))
        .header(USER_AGENT, params.marketplace_user_agent.as_str())
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| MarketplaceError::Fetch(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| MarketplaceError::Fetch(e.to_string()))?;

    if !status.is_success() {
        tracing::error!("Marketplace response ({}): {}", status, response_body);
        return Err(MarketplaceError::Api {
            status: status.as_u16(),
            body: response_body,
        });
    }

    serde_json::from_str(&response_body)
        .map_err(|e| MarketplaceError::Serde(format!("Failed to deserialize response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteDataStore;
    use crate::test_utils::params_for;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn purchase(id: i64, login: &str, account_type: &str, plan_id: i64) -> serde_json::Value {
        json!({
            "billing_cycle": "monthly",
            "account": { "id": id, "login": login, "type": account_type },
            "plan": { "id": plan_id, "name": "Plan" }
        })
    }

    #[tokio::test]
    async fn test_sync_upserts_each_purchase() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/marketplace_purchases"))
            .and(header("authorization", "token gho_token"))
            .and(header("user-agent", "IMGBOT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                purchase(1, "octocat", "User", 10),
                purchase(2, "acme", "Organization", 20),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let store = SqliteDataStore::in_memory().unwrap();
        let count = sync_marketplace_purchases(&params_for(&server), &store, "gho_token")
            .await
            .unwrap();
        assert_eq!(count, 2);

        let records = MarketplaceStore::list_records(&store).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].account_login, "octocat");
        assert_eq!(records[1].account_type, "Organization");
        assert_eq!(records[1].plan_id, 20);
    }

    #[tokio::test]
    async fn test_sync_twice_keeps_one_record_with_latest_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([purchase(1, "octocat", "User", 10)])),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([purchase(1, "octocat", "User", 11)])),
            )
            .mount(&server)
            .await;

        let store = SqliteDataStore::in_memory().unwrap();
        let params = params_for(&server);
        sync_marketplace_purchases(&params, &store, "t").await.unwrap();
        sync_marketplace_purchases(&params, &store, "t").await.unwrap();

        let records = MarketplaceStore::list_records(&store).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].plan_id, 11);
    }

    #[tokio::test]
    async fn test_sync_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = SqliteDataStore::in_memory().unwrap();
        let count = sync_marketplace_purchases(&params_for(&server), &store, "t")
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_sync_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials"
            })))
            .mount(&server)
            .await;

        let store = SqliteDataStore::in_memory().unwrap();
        match sync_marketplace_purchases(&params_for(&server), &store, "t").await {
            Err(MarketplaceError::Api { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Bad credentials"));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sync_unexpected_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "a list" })))
            .mount(&server)
            .await;

        let store = SqliteDataStore::in_memory().unwrap();
        assert!(matches!(
            sync_marketplace_purchases(&params_for(&server), &store, "t").await,
            Err(MarketplaceError::Serde(_))
        ));
        assert!(MarketplaceStore::list_records(&store).await.unwrap().is_empty());
    }
}
