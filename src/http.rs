//! HTTP utilities for request/response handling and CORS

use lambda_http::{Body, Request, RequestExt, Response};
use serde_json::{json, Value};

use crate::models::{OutputMode, PresentationEnvelope};
use crate::render::html_document;

/// CORS origin header for all responses
pub fn get_cors_origin_header() -> (&'static str, &'static str) {
    ("Access-Control-Allow-Origin", "*")
}

/// Full CORS headers for OPTIONS preflight responses only
pub fn get_cors_preflight_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Access-Control-Allow-Origin", "*"),
        (
            "Access-Control-Allow-Headers",
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
        ),
        ("Access-Control-Allow-Methods", "GET,POST,OPTIONS"),
        ("Access-Control-Max-Age", "86400"),
    ]
}

/// Build an error response with consistent formatting
pub fn error_response(
    status: u16,
    error: &str,
    details: &str,
    suggestion: Option<&str>,
) -> Response<Body> {
    let mut body = json!({
        "error": error,
        "details": details,
    });

    if let Some(suggestion) = suggestion {
        body["suggestion"] = json!(suggestion);
    }

    let (key, value) = get_cors_origin_header();
    Response::builder()
        .status(status)
        .header(key, value)
        .header("Content-Type", "application/json")
        .body(body.to_string().into())
        .expect("Couldn't create error response")
}

/// Write an envelope in the requested output mode. The HTTP status is always 200;
/// the envelope's own status code travels inside the JSON body.
pub fn envelope_response(envelope: &PresentationEnvelope, mode: OutputMode) -> Response<Body> {
    let (content_type, body) = match mode {
        OutputMode::Json => (
            "application/json",
            serde_json::to_string(envelope).unwrap_or_else(|_| {
                json!({ "message": envelope.body_markup, "statusCode": envelope.status_code }).to_string()
            }),
        ),
        OutputMode::Html => ("text/html; charset=utf-8", html_document(&envelope.body_markup)),
    };

    let (key, value) = get_cors_origin_header();
    Response::builder()
        .status(200)
        .header(key, value)
        .header("Content-Type", content_type)
        .body(body.into())
        .expect("Couldn't create envelope response")
}

/// Handle CORS preflight requests
pub fn handle_options() -> Response<Body> {
    let mut response = Response::builder().status(200);

    for (key, value) in get_cors_preflight_headers() {
        response = response.header(key, value);
    }

    response
        .header("Content-Type", "application/json")
        .body(Body::Empty)
        .expect("Couldn't handle CORS request")
}

/// `?format=json|html` wins over the configured default; unknown values are ignored.
pub fn output_mode_for(event: &Request, default: OutputMode) -> OutputMode {
    event
        .query_string_parameters_ref()
        .and_then(|params| params.first("format"))
        .and_then(OutputMode::parse)
        .unwrap_or(default)
}

pub fn parse_json_body(body: &Body) -> Result<Value, String> {
    let body_str: &str = match body {
        Body::Empty => "{}",
        Body::Text(s) => s,
        Body::Binary(b) => std::str::from_utf8(b).map_err(|_| "Could not parse request body as UTF-8".to_string())?,
        _ => "{}",
    };

    serde_json::from_str(body_str).map_err(|e| format!("Could not parse request body as JSON: {}", e))
}
