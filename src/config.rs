use std::env;

pub const BACKEND_URL_VAR: &str = "WORKOUT_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_value(env::var(BACKEND_URL_VAR).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        let base_url = value
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Self { base_url }
    }
}
