use crate::client::ApiClient;
use crate::endpoints::JsonObject;
use crate::error::Result;
use crate::request::{RequestDescriptor, path_segment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Bid,
    Ask,
}

impl OrderSide {
    pub const VALUES: [&'static str; 2] = ["BID", "ASK"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
    Expired,
}

impl OrderStatus {
    pub const VALUES: [&'static str; 4] = ["OPEN", "FILLED", "CANCELLED", "EXPIRED"];
}

/// A bid (buy) or ask (sell) on the exchange. `dry_run` is forwarded untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub side: OrderSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::numbers::whole")]
    pub price_cents: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_reputation: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::numbers::whole_opt"
    )]
    pub max_latency_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::numbers::whole_opt"
    )]
    pub limit: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::numbers::whole_opt"
    )]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ApiClient {
    /// `POST /orders`
    pub async fn place_order(&self, order: &PlaceOrder) -> Result<Value> {
        self.execute(RequestDescriptor::post("/orders").with_body(order)?)
            .await
    }

    /// `GET /orders`
    pub async fn list_orders(&self, query: &OrderQuery) -> Result<Value> {
        self.execute(RequestDescriptor::get("/orders").with_query(query)?)
            .await
    }

    /// `DELETE /orders/{orderId}`
    pub async fn cancel_order(&self, order_id: &str) -> Result<Value> {
        let path = format!("/orders/{}", path_segment(order_id)?);
        self.execute(RequestDescriptor::delete(path)).await
    }

    /// `GET /orderbook`
    pub async fn get_order_book(&self, query: &OrderBookQuery) -> Result<Value> {
        self.execute(RequestDescriptor::get("/orderbook").with_query(query)?)
            .await
    }
}
