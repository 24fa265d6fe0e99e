//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API base URL and the credential storage key are baked in at compile
//! time so static deployments need no runtime bootstrap. Values are public;
//! never put secrets here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Fallback API base when `PRICEWATCH_API_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Fallback `localStorage` key holding the bearer credential.
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub token_storage_key: String,
}

impl AppConfig {
    /// Loads config from `PRICEWATCH_API_URL` / `PRICEWATCH_TOKEN_KEY`.
    pub fn load() -> Self {
        Self::from_values(option_env!("PRICEWATCH_API_URL"), option_env!("PRICEWATCH_TOKEN_KEY"))
    }

    fn from_values(api_base_url: Option<&str>, token_storage_key: Option<&str>) -> Self {
        Self {
            api_base_url: non_empty(api_base_url).unwrap_or(DEFAULT_API_BASE_URL).to_owned(),
            token_storage_key: non_empty(token_storage_key)
                .unwrap_or(DEFAULT_TOKEN_STORAGE_KEY)
                .to_owned(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
