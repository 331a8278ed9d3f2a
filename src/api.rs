//! Remote data client for the fact, image and breed providers.
//!
//! Every call goes to the network: no retries, no caching. Decoding lives in
//! the `parse_*` helpers so it can be exercised without a server.

use serde_json::Value;
use std::sync::OnceLock;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Duration;

use crate::config::Config;
use crate::types::Breed;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("http {0}")]
    Status(u16),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Result of an image search. An empty result set is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Found(String),
    Empty,
}

static HTTP: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP.get_or_init(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            reqwest::Client::builder()
                .pool_max_idle_per_host(4)
                .tcp_nodelay(true)
                .build()
                .unwrap_or_default()
        }

        #[cfg(target_arch = "wasm32")]
        {
            reqwest::Client::builder().build().unwrap_or_default()
        }
    })
}

#[derive(Debug, Clone)]
pub struct CatApi {
    fact_url: String,
    images_url: String,
    breeds_url: String,
    api_key: Option<String>,
    timeout_ms: Option<u64>,
}

impl CatApi {
    pub fn new(fact_url: impl Into<String>, images_url: impl Into<String>, breeds_url: impl Into<String>) -> Self {
        Self {
            fact_url: fact_url.into(),
            images_url: images_url.into(),
            breeds_url: breeds_url.into(),
            api_key: None,
            timeout_ms: None,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            fact_url: cfg.fact_url.clone(),
            images_url: cfg.images_url.clone(),
            breeds_url: cfg.breeds_url.clone(),
            api_key: cfg.cat_api_key.clone(),
            timeout_ms: cfg.request_timeout_ms,
        }
    }

    /// URL for an image search, with the breed filter appended when present.
    pub fn image_search_url(&self, breed_id: Option<&str>) -> String {
        match breed_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => format!("{}?breed_ids={}", self.images_url, urlencoding::encode(id)),
            None => self.images_url.clone(),
        }
    }

    pub async fn fetch_fact(&self) -> Result<String, FetchError> {
        let body = self.get_json(&self.fact_url, false).await?;
        parse_fact(&body)
    }

    pub async fn fetch_image(&self, breed_id: Option<&str>) -> Result<ImageOutcome, FetchError> {
        let url = self.image_search_url(breed_id);
        let body = self.get_json(&url, true).await?;
        parse_image(&body)
    }

    pub async fn fetch_breeds(&self) -> Result<Vec<Breed>, FetchError> {
        let body = self.get_json(&self.breeds_url, true).await?;
        parse_breeds(&body)
    }

    async fn get_json(&self, url: &str, send_key: bool) -> Result<Value, FetchError> {
        let mut req = http_client().get(url);

        if let Some(ms) = self.timeout_ms {
            req = req.timeout(Duration::from_millis(ms));
        }
        if send_key {
            if let Some(key) = &self.api_key {
                req = req.header("x-api-key", key);
            }
        }

        log::debug!("[api] GET {url}");
        let res = req.send().await?;
        if !res.status().is_success() {
            return Err(FetchError::Status(res.status().as_u16()));
        }
        Ok(res.json::<Value>().await?)
    }
}

pub fn parse_fact(body: &Value) -> Result<String, FetchError> {
    body.get("fact")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FetchError::Decode("missing `fact` field".into()))
}

pub fn parse_image(body: &Value) -> Result<ImageOutcome, FetchError> {
    let results = body
        .as_array()
        .ok_or_else(|| FetchError::Decode("image search did not return an array".into()))?;

    match results.first() {
        None => Ok(ImageOutcome::Empty),
        Some(first) => first
            .get("url")
            .and_then(Value::as_str)
            .map(|url| ImageOutcome::Found(url.to_string()))
            .ok_or_else(|| FetchError::Decode("first image has no `url`".into())),
    }
}

pub fn parse_breeds(body: &Value) -> Result<Vec<Breed>, FetchError> {
    let entries = body
        .as_array()
        .ok_or_else(|| FetchError::Decode("breed catalog is not an array".into()))?;

    // One malformed entry shouldn't cost the whole catalog
    Ok(entries
        .iter()
        .filter_map(|b| {
            let id = b.get("id").and_then(Value::as_str);
            let name = b.get("name").and_then(Value::as_str);
            match (id, name) {
                (Some(id), Some(name)) => Some(Breed { id: id.to_string(), name: name.to_string() }),
                _ => {
                    log::warn!("[api] skipping breed entry without id/name: {b}");
                    None
                }
            }
        })
        .collect())
}
