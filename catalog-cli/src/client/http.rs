use super::error::{ClientError, GENERIC_API_FAILURE};
use crate::session::TokenStore;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// HTTP client for the catalog service.
///
/// Every request carries `Authorization: Bearer <token>` while the token
/// store holds a token. Successful calls yield the decoded JSON body, or
/// `None` for `204 No Content`.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpClient {
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::config_error("API URL not configured"));
        }

        let client = Client::builder()
            .user_agent(concat!("catalog-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request with query parameters
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<Value>, ClientError> {
        let mut req = self.client.get(self.url(path));
        if !query.is_empty() {
            req = req.query(query);
        }
        self.send(req).await
    }

    /// Make a POST request with JSON body
    pub async fn post<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<Value>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// Make a POST request with a form-url-encoded body
    pub async fn post_form<B>(
        &self,
        path: &str,
        form: &B,
    ) -> Result<Option<Value>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.post(self.url(path)).form(form)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<Value>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(
        &self,
        path: &str,
    ) -> Result<Option<Value>, ClientError> {
        self.send(self.client.delete(self.url(path))).await
    }

    async fn send(
        &self,
        mut req: RequestBuilder,
    ) -> Result<Option<Value>, ClientError> {
        if let Some(token) = self.tokens.token() {
            req = req.bearer_auth(token);
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("API request error: {e}");
                return Err(ClientError::Transport(e));
            }
        };
        debug!("{} {}", response.status(), response.url());

        Self::handle_response(response).await.inspect_err(|e| {
            error!("API request error: {e}");
        })
    }

    async fn handle_response(
        response: Response,
    ) -> Result<Option<Value>, ClientError> {
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await.map_err(ClientError::Transport)?;

        if status.is_success() {
            let value = serde_json::from_str(&text)?;
            Ok(Some(value))
        } else {
            let detail = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| error_detail(&body));
            Err(ClientError::api_error(
                status.as_u16(),
                detail.unwrap_or_else(|| GENERIC_API_FAILURE.to_string()),
            ))
        }
    }
}

/// Human-readable `detail` from an error body. Strings are used verbatim,
/// structured details (validation errors) are kept as JSON text.
pub(crate) fn error_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
