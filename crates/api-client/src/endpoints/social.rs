use crate::client::ApiClient;
use crate::endpoints::JsonObject;
use crate::error::Result;
use crate::request::{RequestDescriptor, path_segment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvite {
    pub provider_email: String,
    pub function_id: String,
    #[serde(deserialize_with = "crate::numbers::whole")]
    pub agreed_price_cents: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
}

impl ApiClient {
    /// `POST /invites`
    pub async fn create_invite(&self, invite: &CreateInvite) -> Result<Value> {
        self.execute(RequestDescriptor::post("/invites").with_body(invite)?)
            .await
    }

    /// `GET /invites`
    pub async fn list_invites(&self) -> Result<Value> {
        self.execute(RequestDescriptor::get("/invites")).await
    }

    /// `POST /invites/{token}/accept`, sent without a body.
    pub async fn accept_invite(&self, token: &str) -> Result<Value> {
        let path = format!("/invites/{}/accept", path_segment(token)?);
        self.execute(RequestDescriptor::post(path)).await
    }
}
