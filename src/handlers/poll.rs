use lambda_http::tracing::debug;
use lambda_http::{Body, Request, RequestExt, Response};

use crate::cache::FALLBACK_KEY;
use crate::handlers::AppState;
use crate::http::{envelope_response, output_mode_for};
use crate::render::{render, render_loading};

/// Re-serves the last lookup for `?ticket_id=`. Unknown or expired keys get the
/// loading placeholder with a 200, never a 404, so an embedding iframe keeps polling.
pub fn handle_poll(event: &Request, state: &AppState) -> Response<Body> {
    let mode = output_mode_for(event, state.config.default_mode);
    let key = event
        .query_string_parameters_ref()
        .and_then(|params| params.first("ticket_id"))
        .filter(|id| !id.is_empty())
        .unwrap_or(FALLBACK_KEY);

    let envelope = match state.cache.fetch(key) {
        Some(result) => render(&result),
        None => {
            debug!(ticket = %key, "nothing cached yet");
            render_loading()
        }
    };

    envelope_response(&envelope, mode)
}
