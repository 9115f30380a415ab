use serde::Deserialize;

/// Error talking to the time-tracking service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure: refused connection, DNS, timeout, bad body.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status and (usually) its own
    /// error message. Displayed verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

impl ApiError {
    /// Decode a non-2xx response into the server's own words.
    pub async fn from_response(resp: reqwest::Response) -> ApiError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        ApiError::Server {
            status: status.as_u16(),
            message: server_message(status, &body),
        }
    }
}

/// Message precedence: JSON `error` (or `message`) field, then a short plain
/// body, then the HTTP status line. HTML error pages fall through to the
/// status line.
fn server_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 160 && !trimmed.starts_with('<') {
        return trimmed.to_string();
    }

    format!("HTTP {}", status)
}
