// Linkstash services
// Services provide core functionality: auth, crypto, metadata extraction,
// link filtering, the link store, and settings.

pub mod auth_service;
pub mod crypto_service;
pub mod link_filter;
pub mod link_store;
pub mod metadata_extractor;
pub mod settings_engine;
pub mod unfurl_client;
