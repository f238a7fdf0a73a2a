use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::assistant::client::{ChatMessage, ToolCall};
use crate::assistant::search::SearchClient;

pub const SEARCH_TOOL_NAME: &str = "search_with_exa";

/// Tool definitions advertised to the model.
pub fn tool_definitions() -> Value {
    json!([
        {
            "type": "function",
            "function": {
                "name": SEARCH_TOOL_NAME,
                "description": "use an advanced search engine to find information via semantic search",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "the search query",
                        },
                    },
                    "required": ["query"],
                },
            },
        }
    ])
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

/// Executes the model's tool calls and appends the results to the transcript
/// as tool messages. Unknown tool names are skipped with a warning.
pub async fn dispatch_tool_calls(
    search: &SearchClient,
    tool_calls: &[ToolCall],
    messages: &mut Vec<ChatMessage>,
) -> Result<()> {
    for call in tool_calls {
        if call.function.name != SEARCH_TOOL_NAME {
            warn!("Model requested unknown tool: {}", call.function.name);
            continue;
        }

        let args: SearchArgs = serde_json::from_str(&call.function.arguments)
            .with_context(|| format!("Bad arguments for {}: {}", call.function.name, call.function.arguments))?;

        let results = search.search_and_contents(&args.query).await?;
        debug!("Search results: {:?}", results);

        let payload = serde_json::to_string(&results).context("Failed to serialize search results")?;
        messages.push(ChatMessage::tool(payload, call.id.clone()));
        info!("Context updated with {}: {}", SEARCH_TOOL_NAME, args.query);
        println!("Context updated with {}: {}\n", SEARCH_TOOL_NAME, args.query);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::client::FunctionCall;

    fn call(name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: "call_1".to_string(),
            kind: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_dispatch_appends_tool_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results":[{"url":"https://example.com"}]}"#)
            .create_async()
            .await;

        let search = SearchClient::new(server.url(), "key").unwrap();
        let mut messages = Vec::new();
        let calls = vec![call(SEARCH_TOOL_NAME, r#"{"query":"rust"}"#)];

        dispatch_tool_calls(&search, &calls, &mut messages).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "tool");
        assert_eq!(messages[0].tool_call_id.as_deref(), Some("call_1"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_skipped() {
        let server = mockito::Server::new_async().await;
        let search = SearchClient::new(server.url(), "key").unwrap();
        let mut messages = Vec::new();
        let calls = vec![call("delete_everything", "{}")];

        dispatch_tool_calls(&search, &calls, &mut messages).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_arguments_fail() {
        let server = mockito::Server::new_async().await;
        let search = SearchClient::new(server.url(), "key").unwrap();
        let mut messages = Vec::new();
        let calls = vec![call(SEARCH_TOOL_NAME, "not json")];

        let result = dispatch_tool_calls(&search, &calls, &mut messages).await;
        assert!(result.is_err());
    }
}
