//! Ticket webhook ingestion.
use lambda_http::tracing::{debug, info, warn};
use lambda_http::{Body, Request, RequestExt, Response};
use serde_json::Value;

use crate::cache::FALLBACK_KEY;
use crate::extract::{extract_email, lookup_path};
use crate::handlers::AppState;
use crate::http::{envelope_response, output_mode_for, parse_json_body};
use crate::models::LookupResult;
use crate::render::render;

const TICKET_ID_PATHS: [&str; 4] = ["ticket.id", "ticket_id", "TicketId", "id"];

/// Looks up the requester's asset, caches the result under the ticket id and
/// answers with the rendered envelope.
///
/// Always answers 200 so the ticketing system never retries; a malformed body
/// or a failed lookup only shows up in the markup.
pub async fn handle_webhook(event: &Request, state: &AppState) -> Response<Body> {
    let mode = output_mode_for(event, state.config.default_mode);
    let query_key = event
        .query_string_parameters_ref()
        .and_then(|params| params.first("ticket_id"))
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let (key, result) = match parse_json_body(event.body()) {
        Ok(payload) => {
            let key = query_key
                .or_else(|| ticket_id_from_payload(&payload))
                .unwrap_or_else(|| FALLBACK_KEY.to_string());
            let result = match extract_email(&payload) {
                Some(email) => {
                    info!(ticket = %key, "looking up requester");
                    debug!(ticket = %key, email = %email, "extracted requester email");
                    state.assets.lookup(&email).await
                }
                None => {
                    info!(ticket = %key, "no email in webhook payload");
                    LookupResult::NoEmail
                }
            };
            (key, result)
        }
        Err(details) => {
            warn!(error = %details, "malformed webhook payload");
            let key = query_key.unwrap_or_else(|| FALLBACK_KEY.to_string());
            (key, LookupResult::Error { message: details })
        }
    };

    let envelope = render(&result).acknowledged();
    state.cache.store(&key, result);
    envelope_response(&envelope, mode)
}

/// Correlation key carried in the payload, if any.
pub fn ticket_id_from_payload(payload: &Value) -> Option<String> {
    TICKET_ID_PATHS.iter().find_map(|path| match lookup_path(payload, path)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    })
}
