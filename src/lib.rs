//! Relays helpdesk ticket webhooks to an asset lookup in the documentation
//! platform and answers with an HTML snippet the ticket view embeds.

pub mod asset_search;
pub mod cache;
pub mod config;
pub mod extract;
pub mod handlers;
pub mod http;
pub mod models;
pub mod render;
