use crate::client::ApiClient;
use crate::error::Result;
use crate::request::{RequestDescriptor, path_segment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Price {
    pub unit: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qos {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::numbers::whole_opt"
    )]
    pub p95_ms: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::numbers::whole_opt"
    )]
    pub max_tokens: Option<u64>,
}

impl Qos {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.p95_ms.is_none() && self.max_tokens.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeTerms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arbiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_format: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::numbers::whole_opt"
    )]
    pub resolution_hours: Option<u64>,
}

impl DisputeTerms {
    /// `Some` only if at least one term is set.
    #[must_use]
    pub fn non_empty(self) -> Option<Self> {
        let empty =
            self.arbiter.is_none() && self.evidence_format.is_none() && self.resolution_hours.is_none();
        (!empty).then_some(self)
    }
}

/// A new function listing. `qos` is always sent, possibly as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFunction {
    pub fid: String,
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub qos: Qos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispute_terms: Option<DisputeTerms>,
}

/// Partial update of a listing; only present fields are sent.
///
/// `input_schema: Some(Value::Null)` clears the stored input schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFunction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PricePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qos: Option<Qos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispute_terms: Option<DisputeTerms>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDelivery {
    pub escrow_id: String,
    pub output_ref: String,
    pub output_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<String>,
}

impl ApiClient {
    /// `POST /functions`
    pub async fn register_function(&self, function: &RegisterFunction) -> Result<Value> {
        self.execute(RequestDescriptor::post("/functions").with_body(function)?)
            .await
    }

    /// `PATCH /functions/{fid}`
    pub async fn update_function(&self, fid: &str, update: &UpdateFunction) -> Result<Value> {
        let path = format!("/functions/{}", path_segment(fid)?);
        self.execute(RequestDescriptor::patch(path).with_body(update)?)
            .await
    }

    /// `GET /functions/my`
    pub async fn get_my_functions(&self) -> Result<Value> {
        self.execute(RequestDescriptor::get("/functions/my")).await
    }

    /// `GET /jobs`: escrows waiting for this provider's delivery.
    pub async fn poll_jobs(&self) -> Result<Value> {
        self.execute(RequestDescriptor::get("/jobs")).await
    }

    /// `POST /deliveries`
    pub async fn submit_delivery(&self, delivery: &SubmitDelivery) -> Result<Value> {
        self.execute(RequestDescriptor::post("/deliveries").with_body(delivery)?)
            .await
    }

    /// `GET /transactions/earned-today`
    pub async fn get_earned_today(&self) -> Result<Value> {
        self.execute(RequestDescriptor::get("/transactions/earned-today"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_always_sends_qos() {
        let f = RegisterFunction {
            fid: "summarize-v1".to_string(),
            name: "Summarize".to_string(),
            description: "Summarizes text".to_string(),
            price: Price {
                unit: "USD_CENTS".to_string(),
                amount: 5.0,
            },
            ..Default::default()
        };
        let body = serde_json::to_value(&f).expect("json");
        assert_eq!(body["qos"], json!({}));
        assert!(body.get("disputeTerms").is_none());
        assert_eq!(body["price"], json!({"unit": "USD_CENTS", "amount": 5.0}));
    }

    #[test]
    fn empty_dispute_terms_collapse_to_none() {
        assert!(DisputeTerms::default().non_empty().is_none());
        let terms = DisputeTerms {
            resolution_hours: Some(48),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(terms.non_empty()).expect("json"),
            json!({"resolutionHours": 48})
        );
    }

    #[test]
    fn update_sends_only_present_fields() {
        let update = UpdateFunction {
            is_active: Some(false),
            input_schema: Some(Value::Null),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).expect("json"),
            json!({"isActive": false, "inputSchema": null})
        );
    }
}
