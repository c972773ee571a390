use super::{HandlerFuture, ToolDef, WINDOW_DESCRIPTION, parse_args};
use crate::error::ToolError;
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde::Deserialize;
use serde_json::{Value, json};
use theagora_api_client::{
    ApiClient, FunctionSearch, FunctionSort, ReputationQuery, TimeWindow, TrendingQuery,
};
use tracing::debug;

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "browse_marketplace",
            "Search and filter available functions on the Theagora marketplace. Returns function \
             listings with provider info, pricing, and QoS specs. Use with no parameters to browse \
             all, or filter by keyword, price range, or provider.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .string("q", "Search keyword (matches name and description)")
                .number("minPrice", "Minimum price in cents")
                .range(Some(0), None)
                .number("maxPrice", "Maximum price in cents")
                .range(Some(0), None)
                .one_of("sort", &FunctionSort::VALUES, "Sort order")
                .string("provider", "Filter by provider agent ID")
                .build(),
            browse_marketplace,
        ),
        ToolDef::new(
            "get_function_details",
            "Get detailed information about a specific function including provider reputation \
             metrics. Provide the function ID (fid) to look up.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .id("fid", "The function ID (fid) to look up")
                .required()
                .build(),
            get_function_details,
        ),
        ToolDef::new(
            "check_reputation",
            "Get raw reputation metrics for a provider agent: proofPassRate, autoSettledRate, \
             settlementSuccessRate, transaction count, volume, dispute count. No composite score; \
             evaluate risk yourself based on these metrics.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .id("agentId", "The provider agent ID to check")
                .required()
                .string("functionId", "Optional: scope metrics to a specific function")
                .string("dateFrom", "Optional: filter from date (ISO format)")
                .string("dateTo", "Optional: filter to date (ISO format)")
                .build(),
            check_reputation,
        ),
        ToolDef::new(
            "find_trending",
            "Discover trending functions with the highest transaction volume over a time period. \
             Useful for finding popular, active services on the marketplace.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .one_of("period", &TimeWindow::VALUES, WINDOW_DESCRIPTION)
                .integer("limit", "Max results (default: 20)")
                .range(Some(1), Some(50))
                .build(),
            find_trending,
        ),
    ]
}

fn browse_marketplace(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let search: FunctionSearch = parse_args(args)?;
        Ok(client.list_functions(&search).await?)
    }
    .boxed()
}

#[derive(Deserialize)]
struct FunctionDetailsArgs {
    fid: String,
}

/// Outcome of a best-effort secondary lookup.
#[derive(Debug, PartialEq)]
enum Enrichment {
    Available(Value),
    Unavailable,
}

impl Enrichment {
    fn into_value(self) -> Value {
        match self {
            Self::Available(v) => v,
            Self::Unavailable => Value::Null,
        }
    }
}

fn get_function_details(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let FunctionDetailsArgs { fid } = parse_args(args)?;

        let listing = client.list_functions(&FunctionSearch::default()).await?;
        let function = find_by_fid(&listing, &fid)
            .cloned()
            .ok_or_else(|| ToolError::NotFound(format!("Function \"{fid}\" not found.")))?;

        let reputation = provider_reputation(&client, &function, &fid).await;
        Ok(json!({
            "function": function,
            "providerReputation": reputation.into_value(),
        }))
    }
    .boxed()
}

/// The listing endpoint answers with a bare array; a `{"functions": [...]}` wrapper is accepted too.
fn find_by_fid<'a>(listing: &'a Value, fid: &str) -> Option<&'a Value> {
    let functions = match listing {
        Value::Array(items) => items,
        Value::Object(obj) => obj.get("functions").and_then(Value::as_array)?,
        _ => return None,
    };
    functions
        .iter()
        .find(|f| f.get("fid").and_then(Value::as_str) == Some(fid))
}

async fn provider_reputation(client: &ApiClient, function: &Value, fid: &str) -> Enrichment {
    let Some(agent_id) = function
        .pointer("/provider/agentId")
        .and_then(Value::as_str)
    else {
        debug!(fid = %fid, "listing has no provider agent id, skipping reputation");
        return Enrichment::Unavailable;
    };

    let query = ReputationQuery {
        function_id: Some(fid.to_string()),
        ..Default::default()
    };
    match client.get_reputation(agent_id, &query).await {
        Ok(rep) => Enrichment::Available(rep),
        Err(e) => {
            debug!(fid = %fid, agent_id = %agent_id, error = %e, "provider reputation unavailable");
            Enrichment::Unavailable
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckReputationArgs {
    agent_id: String,
    #[serde(flatten)]
    query: ReputationQuery,
}

fn check_reputation(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let CheckReputationArgs { agent_id, query } = parse_args(args)?;
        Ok(client.get_reputation(&agent_id, &query).await?)
    }
    .boxed()
}

fn find_trending(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let query: TrendingQuery = parse_args(args)?;
        Ok(client.get_trending(&query).await?)
    }
    .boxed()
}
