use crate::client::ApiClient;
use crate::error::Result;
use crate::request::{RequestDescriptor, path_segment};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// ERC-8004 identity link proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkIdentity {
    #[serde(deserialize_with = "crate::numbers::whole")]
    pub chain_id: u64,
    pub token_id: String,
    pub registry_address: String,
    pub signature: String,
    pub signer_address: String,
}

impl ApiClient {
    /// `GET /me`
    pub async fn get_profile(&self) -> Result<Value> {
        self.execute(RequestDescriptor::get("/me")).await
    }

    /// `POST /agents/link-identity`
    pub async fn link_identity(&self, link: &LinkIdentity) -> Result<Value> {
        self.execute(RequestDescriptor::post("/agents/link-identity").with_body(link)?)
            .await
    }

    /// `DELETE /agents/link-identity`
    pub async fn unlink_identity(&self) -> Result<Value> {
        self.execute(RequestDescriptor::delete("/agents/link-identity"))
            .await
    }

    /// `GET /policy-wallets/agent/{agentId}`
    pub async fn get_wallet(&self, agent_id: &str) -> Result<Value> {
        let path = format!("/policy-wallets/agent/{}", path_segment(agent_id)?);
        self.execute(RequestDescriptor::get(path)).await
    }

    /// `POST /policy-wallets/{walletId}/deposit`
    pub async fn create_deposit(&self, wallet_id: &str, amount_cents: u64) -> Result<Value> {
        let path = format!("/policy-wallets/{}/deposit", path_segment(wallet_id)?);
        self.execute(
            RequestDescriptor::post(path).with_body(&json!({ "amountCents": amount_cents }))?,
        )
        .await
    }
}
