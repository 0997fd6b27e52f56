use std::env;

/// Process configuration, read once at startup. `.env` values are loaded
/// by `dotenv` before this runs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub app_name: String,
    pub title: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "Funcionários Web".to_string()),
            title: env::var("APP_TITLE").unwrap_or_else(|_| "Funcionários".to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
        }
    }
}
