use crate::client::ApiClient;
use crate::endpoints::JsonObject;
use crate::error::Result;
use crate::request::{RequestDescriptor, path_segment};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Server-side window in which a synchronously executed escrow must complete.
pub const ESCROW_EXECUTION_BUDGET: Duration = Duration::from_secs(30);
/// Extra time allowed on top of [`ESCROW_EXECUTION_BUDGET`] for settlement and transfer.
pub const ESCROW_EXECUTION_GRACE: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEscrow {
    pub function_id: String,
    pub provider_agent_id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::numbers::whole_opt"
    )]
    pub agreed_price_cents: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_execution: Option<bool>,
}

impl CreateEscrow {
    /// Whether the server will execute the function before answering.
    #[must_use]
    pub fn waits_for_execution(&self) -> bool {
        self.wait_for_execution != Some(false)
    }
}

impl ApiClient {
    /// `POST /escrows`
    ///
    /// When the call waits for execution it is bounded by the execution window plus grace,
    /// independently of the client-wide timeout.
    pub async fn create_escrow(&self, escrow: &CreateEscrow) -> Result<Value> {
        let mut request = RequestDescriptor::post("/escrows").with_body(escrow)?;
        if escrow.waits_for_execution() {
            request = request.with_timeout(ESCROW_EXECUTION_BUDGET + ESCROW_EXECUTION_GRACE);
        }
        self.execute(request).await
    }

    /// `GET /escrows/{escrowId}`
    pub async fn get_escrow(&self, escrow_id: &str) -> Result<Value> {
        let path = format!("/escrows/{}", path_segment(escrow_id)?);
        self.execute(RequestDescriptor::get(path)).await
    }

    /// `GET /escrows/{escrowId}/output`
    pub async fn get_escrow_output(&self, escrow_id: &str) -> Result<Value> {
        let path = format!("/escrows/{}/output", path_segment(escrow_id)?);
        self.execute(RequestDescriptor::get(path)).await
    }

    /// `GET /transactions`
    pub async fn get_transactions(&self) -> Result<Value> {
        self.execute(RequestDescriptor::get("/transactions")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn waits_for_execution_unless_explicitly_disabled() {
        let mut escrow = CreateEscrow {
            function_id: "fn".to_string(),
            provider_agent_id: "agent".to_string(),
            ..Default::default()
        };
        assert!(escrow.waits_for_execution());
        escrow.wait_for_execution = Some(true);
        assert!(escrow.waits_for_execution());
        escrow.wait_for_execution = Some(false);
        assert!(!escrow.waits_for_execution());
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let escrow = CreateEscrow {
            function_id: "fn".to_string(),
            provider_agent_id: "agent".to_string(),
            agreed_price_cents: Some(250),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&escrow).expect("json"),
            json!({"functionId": "fn", "providerAgentId": "agent", "agreedPriceCents": 250})
        );
    }
}
