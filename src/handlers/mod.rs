//! Handler modules for Lambda function

pub mod poll;
pub mod webhook;

use crate::asset_search::AssetSearchClient;
use crate::cache::ResultCache;
use crate::config::Config;

pub use poll::handle_poll;
pub use webhook::handle_webhook;

/// Everything that outlives a single invocation.
pub struct AppState {
    pub config: Config,
    pub assets: AssetSearchClient,
    pub cache: ResultCache,
}
