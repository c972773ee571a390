use super::{HandlerFuture, ToolDef, parse_args};
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde_json::Value;
use theagora_api_client::{ApiClient, CreateDispute};

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "file_dispute",
            "File a dispute for a transaction if delivery was unsatisfactory. Both buyers and \
             providers can dispute. Provide the escrow ID and a clear reason.",
            Capability::Destructive,
            SchemaBuilder::new()
                .string("escrowId", "The escrow ID to dispute")
                .required()
                .string("reason", "Clear explanation of why you are disputing")
                .required()
                .build(),
            file_dispute,
        ),
        ToolDef::new(
            "my_disputes",
            "View all disputes you are involved in. Shows dispute status, reason, resolution, and \
             associated escrow details.",
            Capability::ReadOnly,
            SchemaBuilder::new().build(),
            my_disputes,
        ),
    ]
}

fn file_dispute(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let dispute: CreateDispute = parse_args(args)?;
        Ok(client.create_dispute(&dispute).await?)
    }
    .boxed()
}

fn my_disputes(client: ApiClient, _args: Value) -> HandlerFuture {
    async move { Ok(client.list_disputes().await?) }.boxed()
}
