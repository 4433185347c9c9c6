use serde::Deserialize;
use std::path::PathBuf;

pub const PLACEHOLDER_SECRET_KEY: &str = "dev-secret-key-change-in-production";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_file: PathBuf,
    pub secret_key: String,
}

impl AppConfig {
    pub fn uses_placeholder_secret(&self) -> bool {
        self.secret_key == PLACEHOLDER_SECRET_KEY
    }
}

/// Defaults, then `config/app.*` if present, then `CATALOG_*` variables.
/// A bare `SECRET_KEY` variable wins over everything for the secret.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_from("config/app", std::env::var("SECRET_KEY").ok())
}

fn load_from(config_file: &str, secret_key: Option<String>) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("bind_addr", "0.0.0.0:5000")?
        .set_default("data_file", "dashboards.json")?
        .set_default("secret_key", PLACEHOLDER_SECRET_KEY)?
        .add_source(config::File::with_name(config_file).required(false))
        .add_source(config::Environment::with_prefix("CATALOG"))
        .set_override_option("secret_key", secret_key)?
        .build()?;

    Ok(settings.try_deserialize()?)
}
