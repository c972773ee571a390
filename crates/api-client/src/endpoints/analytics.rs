use crate::client::ApiClient;
use crate::endpoints::{TimeWindow, WindowQuery};
use crate::error::Result;
use crate::request::{RequestDescriptor, path_segment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAnalyticsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<String>,
}

impl ApiClient {
    /// `GET /analytics/providers/{providerId}`
    pub async fn get_provider_analytics(
        &self,
        provider_id: &str,
        query: &ProviderAnalyticsQuery,
    ) -> Result<Value> {
        let path = format!("/analytics/providers/{}", path_segment(provider_id)?);
        self.execute(RequestDescriptor::get(path).with_query(query)?)
            .await
    }

    /// `GET /analytics/functions/{functionId}`
    pub async fn get_function_analytics(
        &self,
        function_id: &str,
        query: &WindowQuery,
    ) -> Result<Value> {
        let path = format!("/analytics/functions/{}", path_segment(function_id)?);
        self.execute(RequestDescriptor::get(path).with_query(query)?)
            .await
    }
}
