use anyhow::Context as _;
use futures::future::join_all;
use serde_json::json;
use theagora_api_client::{
    ApiClient, ApiClientError, CreateEscrow, FunctionSearch, FunctionSort, OrderSide, PlaceOrder,
    SessionConfig, WindowQuery,
};
use theagora_test_support::{MockResponse, MockUpstream, RecordedRequest};

fn client_for(upstream: &MockUpstream) -> anyhow::Result<ApiClient> {
    let config = SessionConfig::new(Some("sk_test_123".to_string()), Some(upstream.base_url()))
        .context("session config")?;
    ApiClient::new(config).context("api client")
}

fn profile_or_ok(req: &RecordedRequest) -> MockResponse {
    match req.path.as_str() {
        "/v1/me" => MockResponse::json(&json!({"agentId": "agent-7", "name": "tester"})),
        _ => MockResponse::json(&json!({"ok": true})),
    }
}

#[tokio::test]
async fn every_request_carries_auth_content_type_and_source() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(profile_or_ok).await?;
    let client = client_for(&upstream)?;

    client.get_profile().await?;
    client.list_disputes().await?;

    let requests = upstream.requests();
    assert_eq!(requests.len(), 2);
    for req in &requests {
        assert_eq!(req.header("authorization"), Some("Bearer sk_test_123"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("x-theagora-source"), Some("mcp"));
    }
    assert_eq!(requests[0].path, "/v1/me");
    assert_eq!(requests[1].path, "/v1/disputes");

    upstream.shutdown().await
}

#[tokio::test]
async fn non_2xx_keeps_method_path_status_and_raw_body() -> anyhow::Result<()> {
    let upstream =
        MockUpstream::start(|_| MockResponse::status(402, "insufficient funds: need 500")).await?;
    let client = client_for(&upstream)?;

    let err = client
        .get_escrow("esc-1")
        .await
        .expect_err("402 must be an error");
    match &err {
        ApiClientError::Api {
            method,
            path,
            status,
            body,
        } => {
            assert_eq!(method.as_str(), "GET");
            assert_eq!(path, "/escrows/esc-1");
            assert_eq!(*status, 402);
            assert_eq!(body, "insufficient funds: need 500");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "API GET /escrows/esc-1 failed (402): insufficient funds: need 500"
    );

    upstream.shutdown().await
}

#[tokio::test]
async fn agent_id_is_fetched_once_and_refetched_after_invalidation() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(profile_or_ok).await?;
    let client = client_for(&upstream)?;

    assert_eq!(client.cached_agent_id(), None);
    assert_eq!(client.get_agent_id().await?, "agent-7");
    assert_eq!(client.get_agent_id().await?, "agent-7");
    assert_eq!(upstream.count("GET", "/v1/me"), 1);
    assert_eq!(client.cached_agent_id().as_deref(), Some("agent-7"));

    client.invalidate_agent_id();
    assert_eq!(client.cached_agent_id(), None);
    assert_eq!(client.get_agent_id().await?, "agent-7");
    assert_eq!(upstream.count("GET", "/v1/me"), 2);

    upstream.shutdown().await
}

#[tokio::test]
async fn concurrent_first_use_issues_one_profile_call() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(profile_or_ok).await?;
    let client = client_for(&upstream)?;

    let lookups = (0..10).map(|_| {
        let client = client.clone();
        async move { client.get_agent_id().await }
    });
    for id in join_all(lookups).await {
        assert_eq!(id?, "agent-7");
    }
    assert_eq!(upstream.count("GET", "/v1/me"), 1);

    upstream.shutdown().await
}

#[tokio::test]
async fn failed_profile_lookup_is_not_cached() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(|_| MockResponse::status(500, "boom")).await?;
    let client = client_for(&upstream)?;

    let err = client.get_agent_id().await.expect_err("500");
    assert_eq!(err.status(), Some(500));
    assert_eq!(client.cached_agent_id(), None);

    client.get_agent_id().await.expect_err("still 500");
    assert_eq!(upstream.count("GET", "/v1/me"), 2);

    upstream.shutdown().await
}

#[tokio::test]
async fn cancelling_twice_yields_the_same_outcome_class() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(|req| {
        if req.method == "DELETE" {
            MockResponse::status(409, "{\"error\":\"order is not open\"}")
        } else {
            MockResponse::json(&json!({}))
        }
    })
    .await?;
    let client = client_for(&upstream)?;

    let first = client.cancel_order("ord-1").await.expect_err("409");
    let second = client.cancel_order("ord-1").await.expect_err("409");
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(upstream.count("DELETE", "/v1/orders/ord-1"), 2);

    upstream.shutdown().await
}

#[tokio::test]
async fn query_omits_absent_and_empty_values() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(|_| MockResponse::json(&json!({"functions": []}))).await?;
    let client = client_for(&upstream)?;

    client.list_functions(&FunctionSearch::default()).await?;
    client
        .list_functions(&FunctionSearch {
            q: Some("code review".to_string()),
            min_price: Some(100.0),
            sort: Some(FunctionSort::PriceAsc),
            provider: Some(String::new()),
            ..Default::default()
        })
        .await?;
    client.get_market_summary(&WindowQuery::default()).await?;

    let requests = upstream.requests();
    assert_eq!(requests[0].query, None);
    let mut pairs = requests[1].query_pairs();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("minPrice".to_string(), "100".to_string()),
            ("q".to_string(), "code review".to_string()),
            ("sort".to_string(), "price_asc".to_string()),
        ]
    );
    assert_eq!(requests[2].path, "/v1/market-data/summary");
    assert_eq!(requests[2].query, None);

    upstream.shutdown().await
}

#[tokio::test]
async fn body_only_goes_out_when_present() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(|_| MockResponse::json(&json!({"status": "ok"}))).await?;
    let client = client_for(&upstream)?;

    client.accept_invite("tok-abc").await?;
    client.unlink_identity().await?;
    client.create_deposit("wal-1", 500).await?;

    let requests = upstream.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/v1/invites/tok-abc/accept");
    assert!(requests[0].body.is_empty());
    assert_eq!(requests[1].method, "DELETE");
    assert!(requests[1].body.is_empty());
    assert_eq!(requests[2].path, "/v1/policy-wallets/wal-1/deposit");
    assert_eq!(requests[2].json_body(), Some(json!({"amountCents": 500})));

    upstream.shutdown().await
}

#[tokio::test]
async fn place_order_forwards_dry_run_unchanged() -> anyhow::Result<()> {
    let upstream =
        MockUpstream::start(|_| MockResponse::json(&json!({"dryRun": true, "wouldMatch": 2})))
            .await?;
    let client = client_for(&upstream)?;

    let order = PlaceOrder {
        side: OrderSide::Bid,
        function_id: Some("summarize-v1".to_string()),
        category: None,
        description: None,
        price_cents: 300,
        min_reputation: None,
        max_latency_ms: None,
        expires_at: None,
        metadata: None,
        input: None,
        dry_run: Some(true),
    };
    let result = client.place_order(&order).await?;
    assert_eq!(result["wouldMatch"], 2);

    let requests = upstream.requests();
    assert_eq!(
        requests[0].json_body(),
        Some(json!({
            "side": "BID",
            "functionId": "summarize-v1",
            "priceCents": 300,
            "dryRun": true
        }))
    );

    upstream.shutdown().await
}

#[tokio::test]
async fn path_identifiers_are_escaped_as_one_segment() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(|_| MockResponse::json(&json!({}))).await?;
    let client = client_for(&upstream)?;

    client
        .get_function_analytics("a/b c", &WindowQuery::default())
        .await?;
    assert_eq!(upstream.requests()[0].path, "/v1/analytics/functions/a%2Fb%20c");

    upstream.shutdown().await
}

#[tokio::test]
async fn ids_that_would_normalize_away_never_leave_the_client() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(|_| MockResponse::json(&json!({}))).await?;
    let client = client_for(&upstream)?;

    for err in [
        client.cancel_order("..").await.expect_err("dot-dot order"),
        client.get_escrow_output("..").await.expect_err("dot-dot escrow"),
        client.get_escrow(".").await.expect_err("dot escrow"),
        client.cancel_order("").await.expect_err("empty order"),
    ] {
        assert!(matches!(err, ApiClientError::InvalidRequest(_)), "{err}");
    }
    assert!(upstream.requests().is_empty());

    upstream.shutdown().await
}

#[tokio::test]
async fn empty_success_body_is_null_and_garbage_is_a_decode_error() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(|req| match req.path.as_str() {
        "/v1/jobs" => MockResponse::json(&json!([])),
        "/v1/invites" => MockResponse::status(200, "not json at all"),
        _ => MockResponse::status(204, ""),
    })
    .await?;
    let client = client_for(&upstream)?;

    assert_eq!(client.poll_jobs().await?, json!([]));
    assert_eq!(client.unlink_identity().await?, serde_json::Value::Null);
    let err = client.list_invites().await.expect_err("not json");
    assert!(matches!(err, ApiClientError::Decode(_)));

    upstream.shutdown().await
}

#[tokio::test]
async fn escrow_defaults_to_waiting_for_execution() -> anyhow::Result<()> {
    let upstream =
        MockUpstream::start(|_| MockResponse::json(&json!({"id": "esc-9", "status": "RELEASED"})))
            .await?;
    let client = client_for(&upstream)?;

    let escrow = CreateEscrow {
        function_id: "summarize-v1".to_string(),
        provider_agent_id: "agent-2".to_string(),
        wait_for_execution: Some(true),
        ..Default::default()
    };
    let result = client.create_escrow(&escrow).await?;
    assert_eq!(result["status"], "RELEASED");
    assert_eq!(
        upstream.requests()[0].json_body(),
        Some(json!({
            "functionId": "summarize-v1",
            "providerAgentId": "agent-2",
            "waitForExecution": true
        }))
    );

    upstream.shutdown().await
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() -> anyhow::Result<()> {
    let upstream = MockUpstream::start(|_| MockResponse::json(&json!({}))).await?;
    let base_url = upstream.base_url();
    upstream.shutdown().await?;

    let config = SessionConfig::new(Some("k".to_string()), Some(base_url))?;
    let client = ApiClient::new(config)?;
    let err = client.get_profile().await.expect_err("server is gone");
    assert!(matches!(err, ApiClientError::Transport(_)));
    Ok(())
}

#[test]
fn missing_credential_fails_before_any_network_call() {
    let err = SessionConfig::from_lookup(|_| None).expect_err("no key");
    assert!(matches!(err, ApiClientError::Configuration(_)));
}
