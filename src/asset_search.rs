//! Client for the documentation platform's asset search.

use lambda_http::tracing::{debug, warn};
use reqwest::Client;
use thiserror::Error;

use crate::config::Config;
use crate::models::{AssetSearchResponse, LookupResult};

/// Upstream error bodies end up in the widget, so only this many characters are kept.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failures talking to the asset search API.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("asset search timed out")]
    Timeout,

    #[error("failed to reach asset search: {0}")]
    Transport(reqwest::Error),

    #[error("asset search returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse asset search response: {0}")]
    Decode(reqwest::Error),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else if e.is_decode() {
            LookupError::Decode(e)
        } else {
            LookupError::Transport(e)
        }
    }
}

pub struct AssetSearchClient {
    http: Client,
    base_url: String,
    api_key: String,
    search_param: String,
}

impl AssetSearchClient {
    pub fn new(config: &Config) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(config.lookup_timeout)
            .build()
            .map_err(LookupError::Transport)?;

        Ok(Self {
            http,
            base_url: config.asset_api_url.clone(),
            api_key: config.asset_api_key.clone(),
            search_param: config.search_param.clone(),
        })
    }

    pub fn search_url(&self, email: &str) -> String {
        format!(
            "{}/assets?{}={}",
            self.base_url,
            urlencoding::encode(&self.search_param),
            urlencoding::encode(email)
        )
    }

    /// Searches assets by email. Every failure is folded into `LookupResult::Error`.
    pub async fn lookup(&self, email: &str) -> LookupResult {
        match self.search(email).await {
            Ok(response) => interpret(email, response),
            Err(e) => {
                warn!(error = %e, "asset search failed");
                LookupResult::Error { message: e.to_string() }
            }
        }
    }

    async fn search(&self, email: &str) -> Result<AssetSearchResponse, LookupError> {
        let url = self.search_url(email);
        debug!(url = %url, "searching assets");

        let response = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        Ok(response.json::<AssetSearchResponse>().await?)
    }
}

fn status_error(status: u16, body: &str) -> LookupError {
    let mut body: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS + 1).collect();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        body = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        body.push_str("...");
    }
    LookupError::Status { status, body }
}

/// Only the first asset is reported; the search is expected to be exact on email.
pub fn interpret(email: &str, response: AssetSearchResponse) -> LookupResult {
    match response.assets.into_iter().next() {
        Some(asset) => LookupResult::Found {
            name: asset.name,
            company_name: asset.company_name,
            asset_id: asset.id,
            url: asset.url,
            email: email.to_string(),
        },
        None => LookupResult::NotFound { email: email.to_string() },
    }
}
