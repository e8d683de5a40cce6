/// Hetzner Cloud API client
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::error::{HcloudError, Result};
use super::models::{ActionListResponse, ErrorResponse, Meta};

/// Versioned API root
pub const HCLOUD_API_BASE: &str = "https://api.hetzner.cloud/v1";

/// Items requested per page when walking a collection
pub const PAGE_SIZE: u64 = 50;

/// Main Hetzner Cloud API client
///
/// Holds the bearer token and a reusable HTTP connection pool. Every call is a
/// single round trip; nothing is cached or retried.
#[derive(Clone)]
pub struct HetznerCloudClient {
    client: Client,
    api_token: String,
    base_url: Url,
}

impl HetznerCloudClient {
    /// Create a new Hetzner Cloud API client
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty()
            || header::HeaderValue::from_str(&format!("Bearer {}", api_token)).is_err()
        {
            return Err(HcloudError::InvalidToken);
        }

        let client = Client::builder()
            .user_agent(concat!("fornost/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_token,
            base_url: parse_base_url(HCLOUD_API_BASE)?,
        })
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    fn endpoint_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|source| HcloudError::InvalidEndpoint {
            url: raw.clone(),
            source,
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Perform one request and return the raw body of a successful response
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<String> {
        let url = self.endpoint_url(path, query)?;
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.api_token);
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if status.as_u16() >= 400 {
            return Err(classify_error(status, &raw));
        }

        Ok(raw)
    }

    /// Send a request and decode the response body into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let raw = self.execute(method, path, query, body).await?;
        serde_json::from_str(&raw).map_err(|e| HcloudError::decode("response", e))
    }

    /// Make a GET request to the API
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, &[], None).await
    }

    /// Make a POST request to the API
    pub(crate) async fn post<P: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<R> {
        let body = serde_json::to_vec(payload).map_err(HcloudError::Encode)?;
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// Make a DELETE request to the API, ignoring any response body
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Fetch every page of a collection endpoint.
    ///
    /// `key` names the array inside each envelope (e.g. "servers"). Items are
    /// returned in page order, then in-page order. Traversal stops when the
    /// envelope has no `meta` or `meta.pagination.next_page` is null.
    pub async fn get_all<T: DeserializeOwned>(&self, path: &str, key: &str) -> Result<Vec<T>> {
        let mut all = Vec::new();
        let mut page: u64 = 1;

        loop {
            let query = [("page", page.to_string()), ("per_page", PAGE_SIZE.to_string())];
            let mut envelope: Map<String, Value> =
                self.request(Method::GET, path, &query, None).await?;

            let raw_items = envelope
                .remove(key)
                .ok_or_else(|| HcloudError::MissingKey {
                    key: key.to_string(),
                })?;
            let items: Vec<T> =
                serde_json::from_value(raw_items).map_err(|e| HcloudError::decode(key, e))?;
            debug!("Fetched {} {} from page {}", items.len(), key, page);
            all.extend(items);

            let Some(raw_meta) = envelope.remove("meta") else {
                debug!("No pagination metadata for {}, stopping", key);
                break;
            };
            let next_page = match serde_json::from_value::<Meta>(raw_meta) {
                Ok(meta) => meta.pagination.next_page,
                Err(e) => {
                    debug!("Unreadable pagination metadata for {}: {}", key, e);
                    None
                }
            };
            match next_page {
                Some(next) => page = next,
                None => break,
            }
        }

        Ok(all)
    }

    /// Validate the token and connectivity with a one-item listing of actions
    pub async fn ping(&self) -> Result<()> {
        let response: ActionListResponse = self
            .request(Method::GET, "/actions", &[("per_page", "1".to_string())], None)
            .await?;
        debug!("Ping returned {} action(s)", response.actions.len());
        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| HcloudError::InvalidEndpoint {
        url: raw.to_string(),
        source,
    })
}

/// Turn a failed response into an API error, preferring the structured body
fn classify_error(status: StatusCode, raw: &str) -> HcloudError {
    match serde_json::from_str::<ErrorResponse>(raw) {
        Ok(response) if !response.error.message.is_empty() => HcloudError::Api {
            status: status.as_u16(),
            code: response.error.code,
            message: response.error.message,
        },
        _ => HcloudError::Status {
            status: status.as_u16(),
        },
    }
}
