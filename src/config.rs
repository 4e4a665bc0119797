use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub bundle: BundleConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to the services/plans price catalog JSON document
    pub services_file: String,
    /// Path to the service → default plan JSON document
    pub default_plans_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            services_file: "data/services-pricing.json".to_string(),
            default_plans_file: "data/default-plans.json".to_string(),
        }
    }
}

/// The promoted bundle the current stack is compared against
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BundleConfig {
    pub product_name: String,
    /// Annual price per user in yen
    pub price_per_user_per_year: i64,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            product_name: "Google Workspace Business Standard".to_string(),
            price_per_user_per_year: 19_200,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub enabled: bool,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            timeout_seconds: 30,
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub enabled: bool,
    /// Webhook endpoint that performs the actual email delivery
    pub webhook_url: String,
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: String::new(),
            timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:./data/diagnosis.db?mode=rwc".to_string(),
        }
    }
}

/// Load configuration from a TOML file merged with environment overrides
/// (`DIAGNOSIS__SERVER__PORT=9000` style).
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("DIAGNOSIS").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.bundle.price_per_user_per_year < 1 {
        anyhow::bail!("Bundle price must be at least 1 yen per user per year");
    }

    if cfg.catalog.services_file.is_empty() || cfg.catalog.default_plans_file.is_empty() {
        anyhow::bail!("Catalog file paths cannot be empty");
    }

    if cfg.gemini.enabled && cfg.gemini.api_key.is_empty() {
        anyhow::bail!("Gemini is enabled but no API key is configured");
    }

    if cfg.email.enabled {
        if cfg.email.webhook_url.is_empty() {
            anyhow::bail!("Email notification is enabled but no webhook URL is configured");
        }
        if !cfg.email.webhook_url.starts_with("http") {
            anyhow::bail!(
                "Email webhook URL must be an HTTP(S) endpoint: {}",
                cfg.email.webhook_url
            );
        }
    }

    if cfg.database.url.is_empty() {
        anyhow::bail!("Database URL cannot be empty");
    }

    Ok(())
}

impl Config {
    /// Copy of the config safe to print: secrets are masked.
    pub fn redacted(&self) -> Config {
        let mut cfg = self.clone();
        if !cfg.gemini.api_key.is_empty() {
            cfg.gemini.api_key = crate::logging::SensitiveValue::new(&self.gemini.api_key).to_string();
        }
        if !cfg.email.webhook_url.is_empty() {
            cfg.email.webhook_url =
                crate::logging::SensitiveValue::new(&self.email.webhook_url).to_string();
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.bundle.price_per_user_per_year, 19_200);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_bundle_price() {
        let mut cfg = Config::default();
        cfg.bundle.price_per_user_per_year = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_requires_gemini_key_when_enabled() {
        let mut cfg = Config::default();
        cfg.gemini.enabled = true;
        assert!(validate_config(&cfg).is_err());

        cfg.gemini.api_key = "AIza-test".to_string();
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_validate_requires_http_webhook_when_email_enabled() {
        let mut cfg = Config::default();
        cfg.email.enabled = true;
        assert!(validate_config(&cfg).is_err());

        cfg.email.webhook_url = "ftp://example.com".to_string();
        assert!(validate_config(&cfg).is_err());

        cfg.email.webhook_url = "https://script.google.com/macros/s/abc/exec".to_string();
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let mut cfg = Config::default();
        cfg.gemini.api_key = "AIzaSyA-very-secret-key".to_string();

        let redacted = cfg.redacted();
        assert!(!redacted.gemini.api_key.contains("very-secret"));
        assert!(redacted.gemini.api_key.ends_with("***"));
    }
}
