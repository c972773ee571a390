//! Newline-delimited JSON-RPC 2.0 over stdio.
//!
//! One message per line in, at most one response per line out. Notifications (no `id`) never
//! get a response. Requests are handled concurrently, so responses may come back in a different
//! order than the requests; clients match them by `id`.

use rmcp::model::{ErrorCode, ListToolsResult};
use serde_json::{Value, json};
use std::sync::Arc;
use theagora_tools::{RegistryError, ToolRegistry};
use tokio::io::{AsyncBufReadExt as _, AsyncRead, AsyncWrite, AsyncWriteExt as _, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Protocol revisions this server speaks, newest first.
const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

/// Serve requests from `reader` until EOF, then wait for in-flight requests to finish.
///
/// Each request runs on its own task; a single writer serializes the responses.
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails.
pub async fn serve<R, W>(
    registry: Arc<ToolRegistry>,
    reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();

    let read_loop = async move {
        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            let registry = registry.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = handle_line(&registry, &line).await {
                    // The writer only goes away when stdout failed; nothing left to do.
                    let _ = tx.send(response);
                }
            });
        }
        anyhow::Ok(())
    };

    let write_loop = async move {
        while let Some(response) = rx.recv().await {
            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
        }
        anyhow::Ok(())
    };

    tokio::try_join!(read_loop, write_loop)?;
    Ok(())
}

pub async fn handle_line(registry: &ToolRegistry, line: &str) -> Option<Value> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let msg: Value = match serde_json::from_str(line) {
        Ok(msg) => msg,
        Err(e) => {
            warn!(error = %e, "unparseable JSON-RPC message");
            return Some(jsonrpc_err(
                &Value::Null,
                ErrorCode::PARSE_ERROR,
                &format!("Parse error: {e}"),
            ));
        }
    };
    handle_message(registry, &msg).await
}

async fn handle_message(registry: &ToolRegistry, msg: &Value) -> Option<Value> {
    let Some(method) = msg.get("method").and_then(Value::as_str) else {
        let id = msg.get("id").cloned().unwrap_or(Value::Null);
        return Some(jsonrpc_err(
            &id,
            ErrorCode::INVALID_REQUEST,
            "Invalid request: missing method",
        ));
    };

    let Some(id) = msg.get("id").cloned() else {
        debug!(method = %method, "notification");
        if method == "notifications/initialized" {
            info!("client initialized");
        }
        return None;
    };

    let params = msg.get("params").cloned().unwrap_or(Value::Null);
    match method {
        "initialize" => Some(jsonrpc_ok(&id, &initialize_result(&params))),
        "ping" => Some(jsonrpc_ok(&id, &json!({}))),
        "tools/list" => {
            let result = ListToolsResult {
                tools: registry.list_tools(),
                ..Default::default()
            };
            Some(to_response(&id, &result))
        }
        "tools/call" => Some(tools_call(registry, &id, &params).await),
        other => {
            debug!(method = %other, "unsupported method");
            Some(jsonrpc_err(
                &id,
                ErrorCode::METHOD_NOT_FOUND,
                &format!("Method not found: {other}"),
            ))
        }
    }
}

/// Echo the client's protocol version when supported, otherwise answer with the newest one.
fn initialize_result(params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let protocol_version = requested
        .and_then(|v| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|s| **s == v))
        .unwrap_or(&SUPPORTED_PROTOCOL_VERSIONS[0]);
    if let Some(v) = requested
        && v != *protocol_version
    {
        info!(requested = %v, answered = %protocol_version, "unsupported protocol version");
    }

    json!({
        "protocolVersion": protocol_version,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": "theagora", "version": env!("CARGO_PKG_VERSION") }
    })
}

async fn tools_call(registry: &ToolRegistry, id: &Value, params: &Value) -> Value {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return jsonrpc_err(id, ErrorCode::INVALID_PARAMS, "Invalid params: missing tool name");
    };
    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

    match registry.call_tool(name, arguments).await {
        Ok(result) => to_response(id, &result),
        Err(e @ RegistryError::UnknownTool(_)) => {
            jsonrpc_err(id, ErrorCode::INVALID_PARAMS, &e.to_string())
        }
    }
}

fn to_response<T: serde::Serialize>(id: &Value, result: &T) -> Value {
    match serde_json::to_value(result) {
        Ok(result) => jsonrpc_ok(id, &result),
        Err(e) => jsonrpc_err(
            id,
            ErrorCode::INTERNAL_ERROR,
            &format!("failed to serialize result: {e}"),
        ),
    }
}

fn jsonrpc_ok(id: &Value, result: &Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn jsonrpc_err(id: &Value, code: ErrorCode, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code.0, "message": message } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use theagora_api_client::{ApiClient, SessionConfig};
    use theagora_test_support::{MockResponse, MockUpstream};

    fn offline_registry() -> ToolRegistry {
        let config = SessionConfig::new(
            Some("sk_test".to_string()),
            Some("http://127.0.0.1:9".to_string()),
        )
        .expect("config");
        ToolRegistry::new(ApiClient::new(config).expect("client"))
    }

    #[tokio::test]
    async fn initialize_echoes_protocol_version() {
        let registry = offline_registry();
        let resp = handle_line(
            &registry,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18"}}"#,
        )
        .await
        .expect("response");
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], "2025-06-18");
        assert_eq!(resp["result"]["serverInfo"]["name"], "theagora");
    }

    #[tokio::test]
    async fn initialize_answers_unknown_versions_with_the_newest_supported() {
        let registry = offline_registry();
        for params in [json!({"protocolVersion": "1999-01-01"}), json!({})] {
            let line = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": params});
            let resp = handle_line(&registry, &line.to_string())
                .await
                .expect("response");
            assert_eq!(resp["result"]["protocolVersion"], SUPPORTED_PROTOCOL_VERSIONS[0]);
        }

        let resp = handle_line(
            &registry,
            r#"{"jsonrpc":"2.0","id":2,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
        )
        .await
        .expect("response");
        assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn notifications_and_blank_lines_get_no_response() {
        let registry = offline_registry();
        assert!(
            handle_line(
                &registry,
                r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#
            )
            .await
            .is_none()
        );
        assert!(handle_line(&registry, "   ").await.is_none());
    }

    #[tokio::test]
    async fn tools_list_returns_the_catalog() {
        let registry = offline_registry();
        let resp = handle_line(&registry, r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#)
            .await
            .expect("response");
        let tools = resp["result"]["tools"].as_array().expect("tools array");
        assert_eq!(tools.len(), 32);
        let deposit = tools
            .iter()
            .find(|t| t["name"] == "deposit")
            .expect("deposit tool");
        assert_eq!(deposit["inputSchema"]["properties"]["amountCents"]["minimum"], 100);
        assert_eq!(deposit["annotations"]["destructiveHint"], true);
    }

    #[tokio::test]
    async fn protocol_errors_use_json_rpc_codes() {
        let registry = offline_registry();

        let resp = handle_line(&registry, "{not json").await.expect("response");
        assert_eq!(resp["error"]["code"], -32700);
        assert_eq!(resp["id"], Value::Null);

        let resp = handle_line(&registry, r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#)
            .await
            .expect("response");
        assert_eq!(resp["error"]["code"], -32601);

        let resp = handle_line(
            &registry,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
        )
        .await
        .expect("response");
        assert_eq!(resp["error"]["code"], -32602);
        assert_eq!(resp["error"]["message"], "Unknown tool: nope");
    }

    #[tokio::test]
    async fn ping_answers_empty_result() {
        let registry = offline_registry();
        let resp = handle_line(&registry, r#"{"jsonrpc":"2.0","id":9,"method":"ping"}"#)
            .await
            .expect("response");
        assert_eq!(resp["result"], json!({}));
    }

    #[tokio::test]
    async fn serve_writes_one_line_per_response() {
        let registry = offline_registry();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n"
        );
        let mut output = Vec::new();
        serve(Arc::new(registry), input.as_bytes(), &mut output)
            .await
            .expect("serve");
        let text = String::from_utf8(output).expect("utf8");
        let mut ids: Vec<i64> = text
            .lines()
            .map(|l| {
                serde_json::from_str::<Value>(l).expect("json")["id"]
                    .as_i64()
                    .expect("numeric id")
            })
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn slow_call_does_not_hold_back_later_requests() {
        let upstream = MockUpstream::start(|req| match req.path.as_str() {
            "/v1/escrows" => MockResponse::json(&json!({"id": "esc-1", "status": "COMPLETED"}))
                .with_delay(Duration::from_millis(500)),
            _ => MockResponse::status(404, "no such route"),
        })
        .await
        .expect("upstream");
        let config = SessionConfig::new(Some("sk_test".to_string()), Some(upstream.base_url()))
            .expect("config");
        let registry = Arc::new(ToolRegistry::new(ApiClient::new(config).expect("client")));

        let input = format!(
            "{}\n{}\n",
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": {
                "name": "create_escrow",
                "arguments": {"functionId": "fn-1", "providerAgentId": "agent-2"}
            }}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}),
        );
        let mut output = Vec::new();
        serve(registry, input.as_bytes(), &mut output)
            .await
            .expect("serve");

        let text = String::from_utf8(output).expect("utf8");
        let ids: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str::<Value>(l).expect("json")["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!(2), json!(1)]);
        assert_eq!(upstream.count("POST", "/v1/escrows"), 1);
    }
}
