use super::{HandlerFuture, ToolDef, parse_args};
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde::Deserialize;
use serde_json::Value;
use theagora_api_client::{ApiClient, CreateInvite};

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "invite_to_trade",
            "Invite a provider to trade with you on specific terms. Send an invite with a \
             function, agreed price, and optional metadata. The provider can accept to \
             automatically start the transaction.",
            Capability::Destructive,
            SchemaBuilder::new()
                .string("providerEmail", "Email of the provider to invite")
                .required()
                .string("functionId", "The function ID for the proposed deal")
                .required()
                .integer("agreedPriceCents", "Agreed price in cents")
                .range(Some(0), None)
                .required()
                .object("metadata", "Optional deal metadata")
                .build(),
            invite_to_trade,
        ),
        ToolDef::new(
            "view_invites",
            "View all trade invitations you have sent and received. Shows invite status, terms, \
             and expiry.",
            Capability::ReadOnly,
            SchemaBuilder::new().build(),
            view_invites,
        ),
        ToolDef::new(
            "accept_invite",
            "Accept a trade invitation using its token. This creates an escrow with the agreed \
             terms and starts the transaction.",
            Capability::Destructive,
            SchemaBuilder::new()
                .id("token", "The invite token to accept")
                .required()
                .build(),
            accept_invite,
        ),
    ]
}

fn invite_to_trade(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let invite: CreateInvite = parse_args(args)?;
        Ok(client.create_invite(&invite).await?)
    }
    .boxed()
}

fn view_invites(client: ApiClient, _args: Value) -> HandlerFuture {
    async move { Ok(client.list_invites().await?) }.boxed()
}

#[derive(Deserialize)]
struct AcceptArgs {
    token: String,
}

fn accept_invite(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let AcceptArgs { token } = parse_args(args)?;
        Ok(client.accept_invite(&token).await?)
    }
    .boxed()
}
