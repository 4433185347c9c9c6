// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod flash_cookie;
pub mod json_store;
pub mod security_headers;
pub mod templates;
