use super::{HandlerFuture, ToolDef, parse_args};
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde::Deserialize;
use serde_json::Value;
use theagora_api_client::{ApiClient, TimeWindow, WindowQuery};

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "get_market_data",
            "Get comprehensive market data for a specific function: price stats \
             (min/max/avg/median), trade volume, settlement quality rates, and order book depth. \
             Essential for making informed trading decisions.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .id("functionId", "The function ID (fid) to get market data for")
                .required()
                .one_of(
                    "window",
                    &TimeWindow::VALUES,
                    "Time window for historical data (default: 7d)",
                )
                .build(),
            get_market_data,
        ),
        ToolDef::new(
            "get_market_summary",
            "Get a global summary of the Theagora exchange: overall trade volume, active function \
             count, open order count, and top functions by volume. Good for understanding overall \
             market activity before diving into specific functions.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .one_of(
                    "window",
                    &TimeWindow::VALUES,
                    "Time window for volume data (default: 7d)",
                )
                .build(),
            get_market_summary,
        ),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketDataArgs {
    function_id: String,
    #[serde(flatten)]
    query: WindowQuery,
}

fn get_market_data(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let MarketDataArgs { function_id, query } = parse_args(args)?;
        Ok(client.get_market_data(&function_id, &query).await?)
    }
    .boxed()
}

fn get_market_summary(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let query: WindowQuery = parse_args(args)?;
        Ok(client.get_market_summary(&query).await?)
    }
    .boxed()
}
