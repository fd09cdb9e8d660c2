//! API configuration

use serde::Deserialize;

use core_kernel::Currency;
use domain_claims::ValidationThresholds;

/// Optional configuration file read from the working directory
pub const CONFIG_FILE: &str = "claims-api";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Currency claims are priced in when a request does not say
    pub currency: Currency,
    /// Limits used by the claim and batch heuristics
    pub thresholds: ValidationThresholds,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            currency: Currency::NGN,
            thresholds: ValidationThresholds::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `claims-api.toml` (if present) overlaid with
    /// `API_` environment variables. Nested keys use a double underscore,
    /// e.g. `API_THRESHOLDS__MAX_QUANTITY=30`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.currency, Currency::NGN);
        assert_eq!(config.thresholds, ValidationThresholds::default());
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9090)
            .unwrap()
            .set_override("thresholds.max_quantity", 30)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.thresholds.max_quantity, 30);
        assert_eq!(config.thresholds.late_submission_days, 90);
        assert_eq!(config.jwt_expiration_secs, 3600);
    }
}
