/// OpenAI-compatible chat completions.
///
/// Non-streaming requests get a single chat.completion payload; streaming
/// requests get SSE chat.completion.chunk events, one whitespace-delimited
/// piece at a time, closed by an empty-delta stop chunk and `[DONE]`.
/// Concatenating the streamed deltas reproduces the non-streaming content
/// exactly.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::Json;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use travel_core::{render, ChatMessage, Role, TripRequest};

const STREAM_CHUNK_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub stream: Option<bool>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
}

fn request_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("chatcmpl-{}", &hex[..8])
}

/// Split the response into streamable pieces. Each piece keeps its
/// trailing whitespace, so the concatenation of all pieces is exactly the
/// original text.
pub fn chunk_deltas(text: &str) -> Vec<String> {
    text.split_inclusive(char::is_whitespace)
        .map(|s| s.to_string())
        .collect()
}

fn completion_chunk(id: &str, created: i64, model: &str, delta: serde_json::Value, finish_reason: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "object": "chat.completion.chunk",
        "created": created,
        "model": model,
        "choices": [{
            "index": 0,
            "delta": delta,
            "finish_reason": finish_reason,
        }]
    })
}

/// POST /chat/completions
pub async fn chat_completions(Json(request): Json<ChatCompletionRequest>) -> Response {
    let trip = TripRequest::from_messages(&request.messages);
    let content = render::team_summary(&trip);

    // Accepted for contract compatibility; generation here is deterministic
    tracing::debug!(
        temperature = ?request.temperature,
        max_tokens = ?request.max_tokens,
        "generation overrides ignored"
    );

    let id = request_id();
    let created = chrono::Utc::now().timestamp();
    let model = request.model.unwrap_or_else(|| "travel-agent".to_string());

    tracing::info!(
        "Chat completion {} for {} ({} streaming)",
        id,
        trip.destination,
        if request.stream.unwrap_or(false) { "with" } else { "without" }
    );

    if request.stream.unwrap_or(false) {
        let stream = async_stream::stream! {
            for delta in chunk_deltas(&content) {
                let chunk = completion_chunk(&id, created, &model, json!({ "content": delta }), None);
                yield Ok::<_, Infallible>(Event::default().data(chunk.to_string()));
                tokio::time::sleep(STREAM_CHUNK_DELAY).await;
            }

            let done = completion_chunk(&id, created, &model, json!({}), Some("stop"));
            yield Ok(Event::default().data(done.to_string()));
            yield Ok(Event::default().data("[DONE]"));
        };

        return Sse::new(stream).keep_alive(KeepAlive::default()).into_response();
    }

    Json(ChatCompletionResponse {
        id,
        object: "chat.completion".to_string(),
        created,
        model,
        choices: vec![ChatCompletionChoice {
            index: 0,
            message: ChatMessage {
                role: Role::Assistant,
                content,
            },
            finish_reason: "stop".to_string(),
        }],
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_deltas_concatenate_to_original() {
        let trip = TripRequest::from_messages(&[ChatMessage::user(
            "Plan me a 5 day trip to Paris with a $3000 budget",
        )]);
        let content = render::team_summary(&trip);

        let rebuilt: String = chunk_deltas(&content).concat();
        assert_eq!(rebuilt, content);
    }

    #[test]
    fn test_chunk_deltas_keep_newlines() {
        let deltas = chunk_deltas("one two\nthree");
        assert_eq!(deltas, vec!["one ", "two\n", "three"]);
    }

    #[test]
    fn test_request_id_shape() {
        let id = request_id();
        assert!(id.starts_with("chatcmpl-"));
        assert_eq!(id.len(), "chatcmpl-".len() + 8);
    }

    #[test]
    fn test_completion_chunk_layout() {
        let chunk = completion_chunk("chatcmpl-abc", 1700000000, "travel-agent",
            json!({ "content": "hi " }), None);
        assert_eq!(chunk["object"], "chat.completion.chunk");
        assert_eq!(chunk["choices"][0]["delta"]["content"], "hi ");
        assert!(chunk["choices"][0]["finish_reason"].is_null());

        let stop = completion_chunk("chatcmpl-abc", 1700000000, "travel-agent",
            json!({}), Some("stop"));
        assert_eq!(stop["choices"][0]["finish_reason"], "stop");
    }

    #[test]
    fn test_non_streaming_response_serialization() {
        let response = ChatCompletionResponse {
            id: "chatcmpl-test1234".to_string(),
            object: "chat.completion".to_string(),
            created: 1700000000,
            model: "travel-agent".to_string(),
            choices: vec![ChatCompletionChoice {
                index: 0,
                message: ChatMessage::assistant("done"),
                finish_reason: "stop".to_string(),
            }],
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();
        assert_eq!(value["object"], "chat.completion");
        assert_eq!(value["choices"][0]["message"]["role"], "assistant");
        assert_eq!(value["choices"][0]["finish_reason"], "stop");
    }

    #[test]
    fn test_request_accepts_minimal_payload() {
        let request: ChatCompletionRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"Tokyo please"}]}"#,
        )
        .unwrap();
        assert!(request.model.is_none());
        assert!(request.stream.is_none());
        assert_eq!(request.messages.len(), 1);
    }
}
