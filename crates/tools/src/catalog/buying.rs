use super::{HandlerFuture, ToolDef, parse_args};
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde::Deserialize;
use serde_json::Value;
use theagora_api_client::{ApiClient, CreateEscrow};

const INPUT_DESCRIPTION: &str = "Input data to pass to the function (e.g. {\"text\": \"hello\"}). \
     For auto-executable functions, this is sent directly to the provider endpoint.";

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "create_escrow",
            "Purchase a function by creating an escrow that locks your funds. The provider will be \
             notified and must deliver within the agreed terms. Funds are released automatically on \
             successful verification, or refunded if delivery fails.",
            Capability::Destructive,
            SchemaBuilder::new()
                .string("functionId", "The function ID (fid) to purchase")
                .required()
                .string("providerAgentId", "The provider agent ID")
                .required()
                .integer(
                    "agreedPriceCents",
                    "Agreed price in cents (uses function price if omitted)",
                )
                .range(Some(0), None)
                .object("input", INPUT_DESCRIPTION)
                .object("metadata", "Optional metadata for the transaction")
                .boolean(
                    "waitForExecution",
                    "Wait for execution and get the result inline (default: true). Set to false \
                     for fire-and-forget. Only works for auto-executable functions. Timeout: 30s.",
                )
                .build(),
            create_escrow,
        ),
        ToolDef::new(
            "check_escrow",
            "Check the current status of an escrow transaction. Returns state (HELD, RELEASED, \
             REFUNDED, DISPUTED), delivery status, and settlement details.",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .id("escrowId", "The escrow ID to check")
                .required()
                .build(),
            check_escrow,
        ),
        ToolDef::new(
            "my_purchases",
            "View your transaction history as a buyer. Shows all escrows you have created, their \
             states, and settlement outcomes.",
            Capability::ReadOnly,
            SchemaBuilder::new().build(),
            my_purchases,
        ),
        ToolDef::new(
            "get_delivery_output",
            "Retrieve the output of a completed function execution. Returns the raw output data \
             from a purchased function. Works after the escrow has been settled (RELEASED or \
             REFUNDED).",
            Capability::ReadOnly,
            SchemaBuilder::new()
                .id("escrowId", "The escrow ID to get output for")
                .required()
                .build(),
            get_delivery_output,
        ),
    ]
}

fn create_escrow(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let mut escrow: CreateEscrow = parse_args(args)?;
        escrow.wait_for_execution.get_or_insert(true);
        Ok(client.create_escrow(&escrow).await?)
    }
    .boxed()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EscrowArgs {
    escrow_id: String,
}

fn check_escrow(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let EscrowArgs { escrow_id } = parse_args(args)?;
        Ok(client.get_escrow(&escrow_id).await?)
    }
    .boxed()
}

fn my_purchases(client: ApiClient, _args: Value) -> HandlerFuture {
    async move { Ok(client.get_transactions().await?) }.boxed()
}

fn get_delivery_output(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let EscrowArgs { escrow_id } = parse_args(args)?;
        Ok(client.get_escrow_output(&escrow_id).await?)
    }
    .boxed()
}
