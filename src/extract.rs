//! Locates the requester's email address in a webhook payload.
//!
//! Integrations disagree on where the address lives, so known field paths are
//! probed first. If none of them hold an address, every key and string value in
//! the payload is searched for anything email-shaped, in serialization order.
//! That last stage is best effort: it will happily return an address quoted in
//! an unrelated comment field. Strings are searched unescaped, so a signature
//! like `"Thanks,\njane@acme.com"` yields `jane@acme.com`, not `njane@acme.com`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Probed top to bottom, keys matched case-sensitively.
pub const EMAIL_PATHS: [&str; 11] = [
    "requester.EmailId",
    "requester.email",
    "requester.Email",
    "customer.EmailId",
    "customer.email",
    "customer.Email",
    "contact.email",
    "contact.EmailId",
    "EmailId",
    "email",
    "Email",
];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

/// Walks a dotted path one key at a time.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.as_object()?.get(key))
}

/// Returns the first email found in `payload`, or `None` when there is none.
pub fn extract_email(payload: &Value) -> Option<String> {
    let fields = match payload.get("ticket") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    };

    probe_paths(fields).or_else(|| scan_strings(payload))
}

fn probe_paths(fields: &Value) -> Option<String> {
    EMAIL_PATHS
        .iter()
        .filter_map(|path| lookup_path(fields, path).and_then(Value::as_str))
        .find(|candidate| candidate.contains('@'))
        .map(str::to_string)
}

// Fallback stage, runs against the payload as received (not unwrapped).
// Walks keys before their values, matching the order the payload serializes in.
fn scan_strings(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => first_match(s),
        Value::Array(items) => items.iter().find_map(scan_strings),
        Value::Object(map) => map
            .iter()
            .find_map(|(key, inner)| first_match(key).or_else(|| scan_strings(inner))),
        _ => None,
    }
}

fn first_match(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}
