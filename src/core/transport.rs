use crate::core::ConfigProvider;
use crate::domain::ports::Transport;
use crate::utils::error::{FlyffError, Result, CLIENT_ERROR_CODE};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.flyff.com/";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

const BODY_EXCERPT_CHARS: usize = 200;

/// reqwest-backed transport for the Flyff API.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    content_type: String,
    pass_through_not_found: bool,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: with_trailing_slash(base_url.into()),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            pass_through_not_found: true,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: with_trailing_slash(config.base_url().to_string()),
            content_type: config.content_type().to_string(),
            pass_through_not_found: config.pass_through_not_found(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Relative paths are appended to the base endpoint; absolute URLs are used as given.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn merged_headers(&self, headers: &HashMap<String, String>) -> HashMap<String, String> {
        let mut merged = HashMap::new();
        merged.insert("content-type".to_string(), self.content_type.clone());
        for (key, value) in headers {
            merged.insert(key.to_ascii_lowercase(), value.clone());
        }
        merged
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Value> {
        let url = self.resolve_url(path);
        tracing::debug!("📡 {} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        for (key, value) in self.merged_headers(headers) {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        tracing::debug!("📡 {} {} -> {} ({} bytes)", method, url, status, body.len());

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                tracing::error!("❌ Non-JSON body from {}: {}", final_url, e);
                FlyffError::MalformedResponse {
                    url: final_url,
                    status: status.as_u16(),
                    body: excerpt(&body),
                }
            });
        }

        let parsed = serde_json::from_str::<Value>(&body).ok();

        if status == StatusCode::NOT_FOUND && self.pass_through_not_found {
            if let Some(payload) = parsed.as_ref().filter(|v| v.get("error").is_none()) {
                tracing::debug!("Not-found payload for {} passed through", final_url);
                return Ok(payload.clone());
            }
        }

        Err(remote_error(&method, &final_url, status, parsed.as_ref(), &body))
    }
}

/// Maps a failed response onto `FlyffError::RemoteApi`.
///
/// JSON bodies contribute `error.message` and `error.reason`; anything else becomes the
/// message verbatim with no reason.
fn remote_error(
    method: &Method,
    url: &str,
    status: StatusCode,
    parsed: Option<&Value>,
    raw: &str,
) -> FlyffError {
    let (message, reason) = match parsed {
        Some(json) => {
            let error = json.get("error");
            let message = error
                .and_then(|e| e.get("message"))
                .or_else(|| json.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string);
            let reason = error
                .and_then(|e| e.get("reason"))
                .and_then(Value::as_str)
                .map(str::to_string);
            (message, reason)
        }
        None => {
            let text = raw.trim();
            ((!text.is_empty()).then(|| text.to_string()), None)
        }
    };

    tracing::error!(
        "❌ HTTP error for {} to {} returned {} due to {}",
        method,
        url,
        status.as_u16(),
        message.as_deref().unwrap_or("None")
    );

    FlyffError::RemoteApi {
        http_status: status.as_u16(),
        code: CLIENT_ERROR_CODE,
        message: Some(format!(
            "{}:\n {}",
            url,
            message.as_deref().unwrap_or("None")
        )),
        reason,
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{}...", head)
    }
}
