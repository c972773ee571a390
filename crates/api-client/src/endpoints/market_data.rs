use crate::client::ApiClient;
use crate::endpoints::TimeWindow;
use crate::error::Result;
use crate::request::{RequestDescriptor, path_segment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
}

impl ApiClient {
    /// `GET /market-data/functions/{functionId}`
    pub async fn get_market_data(&self, function_id: &str, query: &WindowQuery) -> Result<Value> {
        let path = format!("/market-data/functions/{}", path_segment(function_id)?);
        self.execute(RequestDescriptor::get(path).with_query(query)?)
            .await
    }

    /// `GET /market-data/summary`
    pub async fn get_market_summary(&self, query: &WindowQuery) -> Result<Value> {
        self.execute(RequestDescriptor::get("/market-data/summary").with_query(query)?)
            .await
    }
}
