use crate::client::ApiClient;
use crate::endpoints::TimeWindow;
use crate::error::Result;
use crate::request::{RequestDescriptor, path_segment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionSort {
    PriceAsc,
    PriceDesc,
    Newest,
    Name,
}

impl FunctionSort {
    pub const VALUES: [&'static str; 4] = ["price_asc", "price_desc", "newest", "name"];
}

/// Marketplace search filters. Prices are in cents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<FunctionSort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<TimeWindow>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::numbers::whole_opt"
    )]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl ApiClient {
    /// `GET /functions`
    pub async fn list_functions(&self, search: &FunctionSearch) -> Result<Value> {
        self.execute(RequestDescriptor::get("/functions").with_query(search)?)
            .await
    }

    /// `GET /functions/trending`
    pub async fn get_trending(&self, query: &TrendingQuery) -> Result<Value> {
        self.execute(RequestDescriptor::get("/functions/trending").with_query(query)?)
            .await
    }

    /// `GET /agents/{agentId}/reputation`
    pub async fn get_reputation(&self, agent_id: &str, query: &ReputationQuery) -> Result<Value> {
        let path = format!("/agents/{}/reputation", path_segment(agent_id)?);
        self.execute(RequestDescriptor::get(path).with_query(query)?)
            .await
    }
}
