//! One thin method per remote endpoint, grouped by marketplace area.
//!
//! Each method accepts a typed record, builds a single [`crate::RequestDescriptor`] and hands it
//! to [`crate::ApiClient::execute`]. Optional fields are `None` → omitted (query) or not
//! serialized (body).

mod analytics;
mod buying;
mod discovery;
mod exchange;
mod identity;
mod market_data;
mod selling;
mod social;
mod trust;

pub use analytics::ProviderAnalyticsQuery;
pub use buying::{CreateEscrow, ESCROW_EXECUTION_BUDGET, ESCROW_EXECUTION_GRACE};
pub use discovery::{FunctionSearch, FunctionSort, ReputationQuery, TrendingQuery};
pub use exchange::{OrderBookQuery, OrderQuery, OrderSide, OrderStatus, PlaceOrder};
pub use identity::LinkIdentity;
pub use market_data::WindowQuery;
pub use selling::{
    DisputeTerms, Price, PricePatch, Qos, RegisterFunction, SubmitDelivery, UpdateFunction,
};
pub use social::CreateInvite;
pub use trust::CreateDispute;

use serde::{Deserialize, Serialize};

/// Free-form JSON object carried through to the API untouched (`input`, `metadata`).
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Look-back window accepted by the trending, market-data and analytics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl TimeWindow {
    pub const VALUES: [&'static str; 3] = ["24h", "7d", "30d"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn windows_serialize_to_wire_labels() {
        let labels: Vec<_> = [TimeWindow::Day, TimeWindow::Week, TimeWindow::Month]
            .iter()
            .map(|w| serde_json::to_value(w).expect("json"))
            .collect();
        assert_eq!(labels, vec![json!("24h"), json!("7d"), json!("30d")]);
    }
}
