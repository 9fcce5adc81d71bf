use serde::{Deserialize, Serialize};

use crate::error::NarrativeBackendError;

pub const API_URL: &str = "https://api.openai.com/v1/responses";

/// Request body for the OpenAI Responses API.
#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    max_output_tokens: u32,
    text: TextOptions,
}

/// Asks for a bare JSON object instead of free text.
#[derive(Serialize)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct Response {
    /// Convenience field, not always present.
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

pub async fn complete_async(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    model: &str,
    system: &str,
    user_message: &str,
    max_tokens: u32,
) -> Result<String, NarrativeBackendError> {
    let request = Request {
        model,
        instructions: system,
        input: user_message,
        max_output_tokens: max_tokens,
        text: TextOptions {
            format: TextFormat { kind: "json_object" },
        },
    };

    let response = client
        .post(url)
        .header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    extract_text(status, &body)
}

fn extract_text(status: u16, body: &str) -> Result<String, NarrativeBackendError> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) => err.error.message,
            Err(_) => body.chars().take(500).collect(),
        };
        return Err(NarrativeBackendError::Api { status, message });
    }

    let parsed: Response = serde_json::from_str(body)?;

    if let Some(text) = parsed.output_text.filter(|t| !t.trim().is_empty()) {
        return Ok(text);
    }

    // Fall back to the output array
    parsed
        .output
        .into_iter()
        .flat_map(|item| item.content)
        .find(|block| block.block_type == "output_text" && !block.text.trim().is_empty())
        .map(|block| block.text)
        .ok_or(NarrativeBackendError::EmptyResponse)
}
