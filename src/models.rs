use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Outcome of one webhook's asset lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Found {
        name: String,
        company_name: String,
        asset_id: i64,
        url: String,
        email: String,
    },
    NotFound {
        email: String,
    },
    NoEmail,
    Error {
        message: String,
    },
}

/// Rendered result, independent of how it is written onto the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationEnvelope {
    #[serde(rename = "message")]
    pub body_markup: String,
    #[serde(rename = "statusCode")]
    pub status_code: String,
}

impl PresentationEnvelope {
    /// Webhook senders retry on anything but success, so failures are reported through the markup only.
    pub fn acknowledged(mut self) -> Self {
        self.status_code = "200".to_string();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `{"message": <html>, "statusCode": "200"}`
    Json,
    /// The markup itself as a `text/html` body.
    Html,
}

impl OutputMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(OutputMode::Json),
            "html" => Some(OutputMode::Html),
            _ => None,
        }
    }
}

// Asset search API
#[derive(Debug, Deserialize, Clone)]
pub struct AssetSearchResponse {
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Asset {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub url: String,
}

/// Some API versions send numeric ids as strings.
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().ok_or_else(|| serde::de::Error::custom("asset id out of range")),
        Value::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!("unexpected asset id: {}", other))),
    }
}
