use super::{HandlerFuture, ToolDef, parse_args};
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde::Deserialize;
use serde_json::Value;
use theagora_api_client::{
    ApiClient, OrderBookQuery, OrderQuery, OrderSide, OrderStatus, PlaceOrder,
};

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "place_order",
            "Place a BID or ASK on the exchange. Immediate match if counter-order exists.",
            Capability::Destructive,
            SchemaBuilder::new()
                .one_of("side", &OrderSide::VALUES, "BID to buy, ASK to sell")
                .required()
                .string(
                    "functionId",
                    "Specific function ID (required for ASK, optional for BID)",
                )
                .string(
                    "category",
                    "Service category for loose matching (e.g., \"code-generation\", \
                     \"data-analysis\")",
                )
                .string(
                    "description",
                    "What you want (BID) or what you offer (ASK)",
                )
                .integer(
                    "priceCents",
                    "Max price to pay (BID) or asking price (ASK) in cents",
                )
                .range(Some(0), None)
                .required()
                .number("minReputation", "BID only: minimum provider reputation (0-1)")
                .range(Some(0), Some(1))
                .integer(
                    "maxLatencyMs",
                    "BID only: maximum acceptable P95 latency in ms",
                )
                .range(Some(0), None)
                .string(
                    "expiresAt",
                    "ISO 8601 expiry time. Omit for good-til-cancelled",
                )
                .object("metadata", "Optional metadata")
                .object(
                    "input",
                    "Input data to pass to the function (e.g. {\"text\": \"hello\"}). For \
                     auto-executable functions, this is sent directly to the provider endpoint.",
                )
                .boolean(
                    "dryRun",
                    "Simulate order without creating records or locking funds. Returns what \
                     WOULD match, including input validation results.",
                )
                .build(),
            place_order,
        ),
        ToolDef::new(
            "my_orders",
            "View your open and recent orders on the exchange.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .one_of("side", &OrderSide::VALUES, "Filter by side")
                .one_of("status", &OrderStatus::VALUES, "Filter by status")
                .integer("limit", "Max results (default 50)")
                .range(Some(1), None)
                .build(),
            my_orders,
        ),
        ToolDef::new(
            "cancel_order",
            "Cancel one of your open orders on the exchange.",
            Capability::DestructiveIdempotent,
            SchemaBuilder::new()
                .id("orderId", "The order ID to cancel")
                .required()
                .build(),
            cancel_order,
        ),
        ToolDef::new(
            "view_orderbook",
            "See current bids and asks on the exchange, with spread information. Filter by \
             function or category.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .string("functionId", "Filter by specific function ID")
                .string("category", "Filter by service category")
                .build(),
            view_orderbook,
        ),
    ]
}

fn place_order(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let order: PlaceOrder = parse_args(args)?;
        Ok(client.place_order(&order).await?)
    }
    .boxed()
}

fn my_orders(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let query: OrderQuery = parse_args(args)?;
        Ok(client.list_orders(&query).await?)
    }
    .boxed()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CancelArgs {
    order_id: String,
}

fn cancel_order(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let CancelArgs { order_id } = parse_args(args)?;
        Ok(client.cancel_order(&order_id).await?)
    }
    .boxed()
}

fn view_orderbook(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let query: OrderBookQuery = parse_args(args)?;
        Ok(client.get_order_book(&query).await?)
    }
    .boxed()
}
