//! Turns a lookup result into the markup the helpdesk widget embeds.

use crate::models::{LookupResult, PresentationEnvelope};

const LOADING_REFRESH_SECS: u32 = 3;

pub fn render(result: &LookupResult) -> PresentationEnvelope {
    match result {
        LookupResult::Found { name, company_name, asset_id, url, email } => envelope(
            "200",
            format!(
                "<div class=\"asset-lookup asset-found\">\
                 <h3>{name}</h3>\
                 <p><strong>Company:</strong> {company}</p>\
                 <p><strong>Email:</strong> {email}</p>\
                 <p><strong>Asset ID:</strong> {asset_id}</p>\
                 <p><a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">Open asset</a></p>\
                 </div>",
                name = escape(name),
                company = escape(company_name),
                email = escape(email),
                asset_id = asset_id,
                url = escape(url),
            ),
        ),
        LookupResult::NotFound { email } => envelope(
            "200",
            format!(
                "<div class=\"asset-lookup asset-not-found\">\
                 <p>No asset found for <strong>{}</strong>.</p>\
                 </div>",
                escape(email)
            ),
        ),
        LookupResult::NoEmail => envelope(
            "200",
            "<div class=\"asset-lookup asset-no-email\">\
             <p>No email address could be found in this ticket.</p>\
             </div>"
                .to_string(),
        ),
        LookupResult::Error { message } => envelope(
            "500",
            format!(
                "<div class=\"asset-lookup asset-error\">\
                 <p>Asset lookup failed: {}</p>\
                 </div>",
                escape(message)
            ),
        ),
    }
}

/// Served to a poller before the webhook for that ticket has been processed.
/// The refresh tag makes an embedding iframe poll on its own.
pub fn render_loading() -> PresentationEnvelope {
    envelope(
        "200",
        format!(
            "<meta http-equiv=\"refresh\" content=\"{}\">\
             <div class=\"asset-lookup asset-loading\"><p>Looking up asset&hellip;</p></div>",
            LOADING_REFRESH_SECS
        ),
    )
}

/// Wraps a fragment in a minimal document for the raw HTML output mode.
pub fn html_document(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Asset lookup</title></head><body>{}</body></html>",
        fragment
    )
}

fn envelope(status_code: &str, body_markup: String) -> PresentationEnvelope {
    PresentationEnvelope {
        body_markup,
        status_code: status_code.to_string(),
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_found() {
        let envelope = render(&LookupResult::Found {
            name: "Jane Doe".to_string(),
            company_name: "Acme".to_string(),
            asset_id: 42,
            url: "https://x/42".to_string(),
            email: "jane@acme.com".to_string(),
        });

        assert_eq!(envelope.status_code, "200");
        for expected in ["Jane Doe", "Acme", "42", "https://x/42", "jane@acme.com"] {
            assert!(envelope.body_markup.contains(expected), "missing {expected}");
        }
        assert!(envelope.body_markup.contains("href=\"https://x/42\""));
    }

    #[test]
    fn test_render_not_found() {
        let envelope = render(&LookupResult::NotFound { email: "nobody@nowhere.com".to_string() });
        assert_eq!(envelope.status_code, "200");
        assert!(envelope.body_markup.contains("nobody@nowhere.com"));
        assert!(envelope.body_markup.contains("No asset found"));
    }

    #[test]
    fn test_render_no_email() {
        let envelope = render(&LookupResult::NoEmail);
        assert_eq!(envelope.status_code, "200");
        assert!(envelope.body_markup.contains("No email address"));
    }

    #[test]
    fn test_render_error_and_acknowledge() {
        let envelope = render(&LookupResult::Error { message: "timed out".to_string() });
        assert_eq!(envelope.status_code, "500");
        assert!(envelope.body_markup.contains("timed out"));

        let acked = envelope.clone().acknowledged();
        assert_eq!(acked.status_code, "200");
        assert_eq!(acked.body_markup, envelope.body_markup);
    }

    #[test]
    fn test_values_are_escaped() {
        let envelope = render(&LookupResult::NotFound { email: "<script>\"x\"@y.com".to_string() });
        assert!(!envelope.body_markup.contains("<script>"));
        assert!(envelope.body_markup.contains("&lt;script&gt;&quot;x&quot;@y.com"));
    }

    #[test]
    fn test_loading_placeholder_refreshes() {
        let envelope = render_loading();
        assert_eq!(envelope.status_code, "200");
        assert!(envelope.body_markup.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_envelope_json_shape() {
        let envelope = render(&LookupResult::NoEmail);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], "200");
        assert!(json["message"].as_str().unwrap().contains("No email"));
    }
}
