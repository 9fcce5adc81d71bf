use serde::{Deserialize, Serialize};

use crate::error::NarrativeBackendError;

pub const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Request body for the Anthropic Messages API.
#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Only the fields we read.
#[derive(Deserialize)]
struct Response {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
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
        max_tokens,
        system,
        messages: vec![Message {
            role: "user",
            content: user_message,
        }],
    };

    let response = client
        .post(url)
        .header("x-api-key", api_key)
        .header("anthropic-version", API_VERSION)
        .header("content-type", "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    extract_text(status, &body)
}

/// Pull the concatenated text blocks out of a raw response.
fn extract_text(status: u16, body: &str) -> Result<String, NarrativeBackendError> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) => err.error.message,
            Err(_) => body.chars().take(500).collect(),
        };
        return Err(NarrativeBackendError::Api { status, message });
    }

    let parsed: Response = serde_json::from_str(body)?;
    let text: String = parsed.content.iter().map(|b| b.text.as_str()).collect();

    if text.trim().is_empty() {
        return Err(NarrativeBackendError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_blocks() {
        let body = r#"{"content": [{"type": "text", "text": "{\"a\":"}, {"type": "text", "text": "1}"}]}"#;
        assert_eq!(extract_text(200, body).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn api_error_uses_message() {
        let body = r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#;
        match extract_text(529, body) {
            Err(NarrativeBackendError::Api { status, message }) => {
                assert_eq!(status, 529);
                assert_eq!(message, "Overloaded");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn api_error_with_unparseable_body() {
        let err = extract_text(502, "<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn empty_content_is_an_error() {
        assert!(matches!(
            extract_text(200, r#"{"content": []}"#),
            Err(NarrativeBackendError::EmptyResponse)
        ));
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(
            extract_text(200, "nope"),
            Err(NarrativeBackendError::Parse(_))
        ));
    }
}
