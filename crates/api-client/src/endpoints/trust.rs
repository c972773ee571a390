use crate::client::ApiClient;
use crate::error::Result;
use crate::request::RequestDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDispute {
    pub escrow_id: String,
    pub reason: String,
}

impl ApiClient {
    /// `POST /disputes`
    pub async fn create_dispute(&self, dispute: &CreateDispute) -> Result<Value> {
        self.execute(RequestDescriptor::post("/disputes").with_body(dispute)?)
            .await
    }

    /// `GET /disputes`
    pub async fn list_disputes(&self) -> Result<Value> {
        self.execute(RequestDescriptor::get("/disputes")).await
    }
}
