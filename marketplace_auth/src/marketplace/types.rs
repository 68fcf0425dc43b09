use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry of the provider's marketplace purchases response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanData {
    pub account: MarketplaceAccount,
    pub plan: MarketplacePlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceAccount {
    pub id: i64,
    pub login: String,
    #[serde(rename = "type")]
    pub account_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplacePlan {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Stored association between a provider account and its purchased plan.
///
/// Keyed by (`account_id`, `account_login`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MarketplaceRecord {
    pub account_id: i64,
    pub account_login: String,
    pub account_type: String,
    pub plan_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PlanData> for MarketplaceRecord {
    fn from(item: &PlanData) -> Self {
        let now = Utc::now();
        Self {
            account_id: item.account.id,
            account_login: item.account.login.clone(),
            account_type: item.account.account_type.clone(),
            plan_id: item.plan.id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_data_deserialization() {
        let body = json!([{
            "billing_cycle": "monthly",
            "next_billing_date": "2017-11-11T00:00:00Z",
            "unit_count": null,
            "on_free_trial": true,
            "free_trial_ends_on": "2017-11-11T00:00:00Z",
            "updated_at": "2017-11-02T01:12:12Z",
            "account": {
                "login": "github",
                "id": 4,
                "url": "https://api.github.com/orgs/github",
                "email": null,
                "organization_billing_email": "billing@github.com",
                "type": "Organization"
            },
            "plan": {
                "url": "https://api.github.com/marketplace_listing/plans/1313",
                "accounts_url": "https://api.github.com/marketplace_listing/plans/1313/accounts",
                "id": 1313,
                "number": 3,
                "name": "Pro",
                "description": "A professional-grade CI solution",
                "monthly_price_in_cents": 1099,
                "yearly_price_in_cents": 11870,
                "price_model": "FLAT_RATE",
                "has_free_trial": true,
                "unit_name": null,
                "state": "published",
                "bullets": ["Up to 25 private repositories"]
            }
        }]);

        let items: Vec<PlanData> = serde_json::from_value(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].account.id, 4);
        assert_eq!(items[0].account.login, "github");
        assert_eq!(items[0].account.account_type, "Organization");
        assert_eq!(items[0].plan.id, 1313);
        assert_eq!(items[0].plan.name.as_deref(), Some("Pro"));
    }

    #[test]
    fn test_plan_data_missing_account() {
        let body = json!([{ "plan": { "id": 1 } }]);
        assert!(serde_json::from_value::<Vec<PlanData>>(body).is_err());
    }

    #[test]
    fn test_record_from_plan_data() {
        let item = PlanData {
            account: MarketplaceAccount {
                id: 7,
                login: "octocat".to_string(),
                account_type: "User".to_string(),
            },
            plan: MarketplacePlan { id: 99, name: None },
        };

        let record = MarketplaceRecord::from(&item);
        assert_eq!(record.account_id, 7);
        assert_eq!(record.account_login, "octocat");
        assert_eq!(record.account_type, "User");
        assert_eq!(record.plan_id, 99);
        assert_eq!(record.created_at, record.updated_at);
    }
}
