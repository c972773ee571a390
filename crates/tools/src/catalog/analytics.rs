use super::{HandlerFuture, ToolDef, WINDOW_DESCRIPTION, parse_args};
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde::Deserialize;
use serde_json::Value;
use theagora_api_client::{ApiClient, ProviderAnalyticsQuery, TimeWindow, WindowQuery};

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "get_provider_analytics",
            "Get provider analytics: total verifications, pass rate by adapter, avg trust score, \
             avg delivery time, function breakdown, and settlement breakdown. Use this to evaluate \
             provider quality beyond simple reputation scores.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .id("providerId", "The provider agent ID to get analytics for")
                .required()
                .one_of("window", &TimeWindow::VALUES, WINDOW_DESCRIPTION)
                .string("functionId", "Optional: scope to a specific function")
                .build(),
            get_provider_analytics,
        ),
        ToolDef::new(
            "get_function_analytics",
            "Get function-level analytics: verification count, adapter pass rates, provider \
             breakdown with delivery times. Use this to evaluate a function's reliability and \
             compare providers.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .id("functionId", "The function ID (fid) to get analytics for")
                .required()
                .one_of("window", &TimeWindow::VALUES, WINDOW_DESCRIPTION)
                .build(),
            get_function_analytics,
        ),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderArgs {
    provider_id: String,
    #[serde(flatten)]
    query: ProviderAnalyticsQuery,
}

fn get_provider_analytics(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let ProviderArgs { provider_id, query } = parse_args(args)?;
        Ok(client.get_provider_analytics(&provider_id, &query).await?)
    }
    .boxed()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunctionArgs {
    function_id: String,
    #[serde(flatten)]
    query: WindowQuery,
}

fn get_function_analytics(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let FunctionArgs { function_id, query } = parse_args(args)?;
        Ok(client.get_function_analytics(&function_id, &query).await?)
    }
    .boxed()
}
