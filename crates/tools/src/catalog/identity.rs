use super::{HandlerFuture, ToolDef, parse_args};
use crate::error::ToolError;
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde::Deserialize;
use serde_json::Value;
use theagora_api_client::{ApiClient, LinkIdentity, numbers};

/// Smallest accepted deposit: $1.00.
const MIN_DEPOSIT_CENTS: i64 = 100;

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "my_profile",
            "View your Theagora agent profile including name, email, account status, and Moltbook \
             identity info if linked.",
            Capability::ReadOnly,
            SchemaBuilder::new().build(),
            my_profile,
        ),
        ToolDef::new(
            "wallet",
            "View your wallet balance, spending caps, and daily spend. Shows deposited balance, \
             earned balance, reserved funds, daily spend cap, max transaction amount, and whether \
             the wallet is paused.",
            Capability::ReadOnly,
            SchemaBuilder::new().build(),
            wallet,
        ),
        ToolDef::new(
            "deposit",
            "Generate a Stripe checkout URL to deposit funds into your wallet. Returns a URL that \
             must be visited to complete the payment. After payment, funds are credited \
             automatically.",
            Capability::Destructive,
            SchemaBuilder::new()
                .integer(
                    "amountCents",
                    "Amount to deposit in cents (minimum $1.00 = 100)",
                )
                .range(Some(MIN_DEPOSIT_CENTS), None)
                .required()
                .build(),
            deposit,
        ),
        ToolDef::new(
            "link_identity",
            "Link an ERC-8004 on-chain agent identity NFT to your Theagora account. Requires an \
             EIP-712 signature proving wallet ownership and on-chain NFT ownership verification. \
             This makes your agent discoverable by the on-chain agent network and enables \
             on-chain reputation writes.",
            Capability::Destructive,
            SchemaBuilder::new()
                .integer(
                    "chainId",
                    "Chain ID where the ERC-8004 NFT lives (e.g., 8453 for Base, 1 for Ethereum)",
                )
                .range(Some(1), None)
                .required()
                .string("tokenId", "ERC-8004 NFT token ID")
                .required()
                .string("registryAddress", "ERC-8004 Identity Registry contract address")
                .required()
                .string("signature", "EIP-712 signature (hex string starting with 0x)")
                .required()
                .string(
                    "signerAddress",
                    "Ethereum address that signed the message (must own the NFT)",
                )
                .required()
                .build(),
            link_identity,
        ),
        ToolDef::new(
            "unlink_identity",
            "Unlink your ERC-8004 on-chain agent identity from your Theagora account. This will \
             stop on-chain reputation writes and remove your on-chain identity link. The nonce is \
             incremented to invalidate any pending signatures.",
            Capability::DestructiveIdempotent,
            SchemaBuilder::new().build(),
            unlink_identity,
        ),
    ]
}

fn my_profile(client: ApiClient, _args: Value) -> HandlerFuture {
    async move { Ok(client.get_profile().await?) }.boxed()
}

fn wallet(client: ApiClient, _args: Value) -> HandlerFuture {
    async move {
        let agent_id = client.get_agent_id().await?;
        Ok(client.get_wallet(&agent_id).await?)
    }
    .boxed()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DepositArgs {
    #[serde(deserialize_with = "numbers::whole")]
    amount_cents: u64,
}

fn deposit(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let DepositArgs { amount_cents } = parse_args(args)?;
        let agent_id = client.get_agent_id().await?;
        let wallet = client.get_wallet(&agent_id).await?;
        let wallet_id = wallet_id(&wallet).ok_or_else(|| {
            ToolError::NotFound("Could not determine wallet ID. Check your profile.".to_string())
        })?;
        Ok(client.create_deposit(&wallet_id, amount_cents).await?)
    }
    .boxed()
}

/// `id`, falling back to `walletId`. Numeric ids are accepted as well.
fn wallet_id(wallet: &Value) -> Option<String> {
    ["id", "walletId"].iter().find_map(|field| match wallet.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn link_identity(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let link: LinkIdentity = parse_args(args)?;
        Ok(client.link_identity(&link).await?)
    }
    .boxed()
}

fn unlink_identity(client: ApiClient, _args: Value) -> HandlerFuture {
    async move { Ok(client.unlink_identity().await?) }.boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wallet_id_prefers_id_then_wallet_id() {
        assert_eq!(wallet_id(&json!({"id": "w1", "walletId": "w2"})).as_deref(), Some("w1"));
        assert_eq!(wallet_id(&json!({"walletId": "w2"})).as_deref(), Some("w2"));
        assert_eq!(wallet_id(&json!({"id": "", "walletId": "w2"})).as_deref(), Some("w2"));
        assert_eq!(wallet_id(&json!({"id": 42})).as_deref(), Some("42"));
        assert_eq!(wallet_id(&json!({"balance": 0})), None);
    }
}
