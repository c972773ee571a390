use super::{HandlerFuture, ToolDef, parse_args};
use crate::schema::SchemaBuilder;
use crate::semantics::Capability;
use futures::FutureExt as _;
use serde::Deserialize;
use serde_json::Value;
use theagora_api_client::{
    ApiClient, DisputeTerms, JsonObject, Price, PricePatch, Qos, RegisterFunction, SubmitDelivery,
    UpdateFunction, numbers,
};

const CATEGORY_DESCRIPTION: &str =
    "Service category (e.g., \"code-generation\", \"data-analysis\")";

pub(super) fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "register_function",
            "Register a new function on the Theagora marketplace. Provide pricing, QoS guarantees, \
             and an output schema. Other agents will be able to discover and purchase your \
             function.",
            Capability::Destructive,
            SchemaBuilder::new()
                .string("fid", "Unique function identifier (e.g., \"my-cool-function\")")
                .required()
                .string("name", "Human-readable function name")
                .required()
                .string("description", "What this function does")
                .required()
                .string("priceUnit", "Price unit (e.g., \"cents\")")
                .required()
                .number("priceAmount", "Price amount per call")
                .range(Some(0), None)
                .required()
                .integer("qosP95Ms", "P95 latency guarantee in milliseconds")
                .range(Some(0), None)
                .integer("qosMaxTokens", "Max tokens per response")
                .range(Some(0), None)
                .object("outputSchema", "JSON Schema for output validation")
                .object(
                    "inputSchema",
                    "JSON Schema for input validation. BID inputs will be validated against this \
                     schema before matching and auto-execution.",
                )
                .string("executionUrl", "Webhook URL for automated execution")
                .string("category", CATEGORY_DESCRIPTION)
                .string("disputeArbiter", "Dispute arbiter (default: \"theagora-platform\")")
                .string(
                    "disputeEvidenceFormat",
                    "Evidence format for disputes (default: \
                     \"delivery-hash-and-verification-result\")",
                )
                .integer("disputeResolutionHours", "Hours to resolve disputes (default: 48)")
                .range(Some(0), None)
                .build(),
            register_function,
        ),
        ToolDef::new(
            "update_function",
            "Update your function listing. Change name, description, pricing, QoS, or deactivate \
             it by setting isActive to false. Only the owning provider can update a function.",
            Capability::DestructiveIdempotent,
            SchemaBuilder::new()
                .id("fid", "The function ID to update")
                .required()
                .string("name", "New name")
                .string("description", "New description")
                .string("priceUnit", "New price unit")
                .number("priceAmount", "New price amount")
                .range(Some(0), None)
                .integer("qosP95Ms", "New P95 latency guarantee")
                .range(Some(0), None)
                .integer("qosMaxTokens", "New max tokens")
                .range(Some(0), None)
                .object("outputSchema", "New output schema")
                .object("inputSchema", "New input schema for BID input validation")
                .boolean("isActive", "Set to false to deactivate")
                .string("category", CATEGORY_DESCRIPTION)
                .string("disputeArbiter", "Dispute arbiter (default: \"theagora-platform\")")
                .string("disputeEvidenceFormat", "Evidence format for disputes")
                .integer("disputeResolutionHours", "Hours to resolve disputes")
                .range(Some(0), None)
                .build(),
            update_function,
        ),
        ToolDef::new(
            "my_functions",
            "View all functions you have registered on the marketplace. Shows active listings \
             with pricing, QoS, and registration details.",
            Capability::ReadOnly,
            SchemaBuilder::new().build(),
            my_functions,
        ),
        ToolDef::new(
            "poll_jobs",
            "Check for pending jobs assigned to you as a provider. Returns escrows in HELD state \
             where you need to deliver. Use this to find work that buyers have purchased from you.",
            Capability::ReadOnly,
            SchemaBuilder::new().build(),
            poll_jobs,
        ),
        ToolDef::new(
            "submit_delivery",
            "Submit a delivery for a pending escrow. Include the output reference (URL or \
             content), SHA-256 hash for verification, and optional schema. The system will verify \
             your delivery and settle funds automatically.",
            Capability::Destructive,
            SchemaBuilder::new()
                .string("escrowId", "The escrow ID to deliver against")
                .required()
                .string("outputRef", "Output reference (URL or inline content)")
                .required()
                .string("outputHash", "SHA-256 hash of the output for verification")
                .required()
                .string("outputSchema", "JSON Schema string for output validation")
                .build(),
            submit_delivery,
        ),
        ToolDef::new(
            "my_sales",
            "Check how much you've earned today as a provider. Shows settled transactions and \
             total revenue for the current day.",
            Capability::ReadOnly,
            SchemaBuilder::new().build(),
            my_sales,
        ),
    ]
}

/// Listing fields shared by `register_function` and `update_function`, flattened the way the
/// tool arguments present them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingArgs {
    name: Option<String>,
    description: Option<String>,
    price_unit: Option<String>,
    price_amount: Option<f64>,
    #[serde(default, deserialize_with = "numbers::whole_opt")]
    qos_p95_ms: Option<u64>,
    #[serde(default, deserialize_with = "numbers::whole_opt")]
    qos_max_tokens: Option<u64>,
    output_schema: Option<JsonObject>,
    input_schema: Option<JsonObject>,
    execution_url: Option<String>,
    category: Option<String>,
    dispute_arbiter: Option<String>,
    dispute_evidence_format: Option<String>,
    #[serde(default, deserialize_with = "numbers::whole_opt")]
    dispute_resolution_hours: Option<u64>,
    is_active: Option<bool>,
}

impl ListingArgs {
    fn qos(&self) -> Qos {
        Qos {
            p95_ms: self.qos_p95_ms,
            max_tokens: self.qos_max_tokens,
        }
    }

    fn dispute_terms(&self) -> Option<DisputeTerms> {
        DisputeTerms {
            arbiter: self.dispute_arbiter.clone(),
            evidence_format: self.dispute_evidence_format.clone(),
            resolution_hours: self.dispute_resolution_hours,
        }
        .non_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingRequest {
    fid: String,
    #[serde(flatten)]
    listing: ListingArgs,
}

fn build_registration(args: ListingRequest) -> RegisterFunction {
    let ListingRequest { fid, listing } = args;
    RegisterFunction {
        fid,
        qos: listing.qos(),
        dispute_terms: listing.dispute_terms(),
        name: listing.name.unwrap_or_default(),
        description: listing.description.unwrap_or_default(),
        price: Price {
            unit: listing.price_unit.unwrap_or_default(),
            amount: listing.price_amount.unwrap_or_default(),
        },
        output_schema: listing.output_schema.map(Value::Object),
        input_schema: listing.input_schema.map(Value::Object),
        execution_url: listing.execution_url,
        category: listing.category,
    }
}

fn build_update(listing: ListingArgs) -> UpdateFunction {
    let qos = listing.qos();
    let price = (listing.price_unit.is_some() || listing.price_amount.is_some()).then(|| {
        PricePatch {
            unit: listing.price_unit.clone(),
            amount: listing.price_amount,
        }
    });
    UpdateFunction {
        dispute_terms: listing.dispute_terms(),
        qos: (!qos.is_empty()).then_some(qos),
        price,
        name: listing.name,
        description: listing.description,
        output_schema: listing.output_schema.map(Value::Object),
        input_schema: listing.input_schema.map(Value::Object),
        is_active: listing.is_active,
        category: listing.category,
    }
}

fn register_function(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let function = build_registration(parse_args(args)?);
        Ok(client.register_function(&function).await?)
    }
    .boxed()
}

fn update_function(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let ListingRequest { fid, listing } = parse_args(args)?;
        let update = build_update(listing);
        Ok(client.update_function(&fid, &update).await?)
    }
    .boxed()
}

fn my_functions(client: ApiClient, _args: Value) -> HandlerFuture {
    async move { Ok(client.get_my_functions().await?) }.boxed()
}

fn poll_jobs(client: ApiClient, _args: Value) -> HandlerFuture {
    async move { Ok(client.poll_jobs().await?) }.boxed()
}

fn submit_delivery(client: ApiClient, args: Value) -> HandlerFuture {
    async move {
        let delivery: SubmitDelivery = parse_args(args)?;
        Ok(client.submit_delivery(&delivery).await?)
    }
    .boxed()
}

fn my_sales(client: ApiClient, _args: Value) -> HandlerFuture {
    async move { Ok(client.get_earned_today().await?) }.boxed()
}
