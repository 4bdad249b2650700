use std::sync::Arc;

use lambda_http::tracing::{error, info};
use lambda_http::{run, service_fn, Body, Request, Response};

use asset_lookup_relay::asset_search::AssetSearchClient;
use asset_lookup_relay::cache::ResultCache;
use asset_lookup_relay::config::Config;
use asset_lookup_relay::handlers::{handle_poll, handle_webhook, AppState};
use asset_lookup_relay::http::{error_response, handle_options};

/// Handle the Lambda event
async fn handle_lambda_event(event: Request, state: &AppState) -> Response<Body> {
    let method = event.method().as_str();
    let path = event.uri().path();

    // Strip /Prod or /prod prefix if it exists
    let path = path
        .strip_prefix("/Prod")
        .or_else(|| path.strip_prefix("/prod"))
        .unwrap_or(path);
    let path = if path.is_empty() { "/" } else { path };

    // Handle CORS preflight requests
    if method == "OPTIONS" {
        return handle_options();
    }

    if !matches!(method, "GET" | "POST") {
        return error_response(
            400,
            "Invalid HTTP method",
            &format!("Method '{}' is not supported", method),
            Some("Ensure you are calling this Lambda via API Gateway"),
        );
    }

    info!(method = %method, path = %path, "handling request");

    match (path, method) {
        ("/webhook", "POST") | ("/", "POST") => handle_webhook(&event, state).await,
        ("/lookup", "GET") => handle_poll(&event, state),
        _ => error_response(
            405,
            "Method not allowed",
            path,
            Some("You're sending a request that doesn't exist."),
        ),
    }
}

/// Main Lambda handler function
async fn function_handler(event: Request, state: &AppState) -> Result<Response<Body>, lambda_http::Error> {
    Ok(handle_lambda_event(event, state).await)
}

fn build_state() -> Result<AppState, lambda_http::Error> {
    let config = Config::from_env()?;
    let assets = AssetSearchClient::new(&config)?;
    let cache = ResultCache::new(config.cache_ttl);
    Ok(AppState { config, assets, cache })
}

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    lambda_http::tracing::init_default_subscriber();

    let state = Arc::new(build_state().inspect_err(|e| error!(error = %e, "failed to initialise"))?);

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { function_handler(event, &state).await }
    }))
    .await
}
