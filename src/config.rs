use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Main import configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Provider used for the AI fallback tier and photo/caption imports
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Page fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// Model call timeout in seconds
    #[serde(default = "default_ai_timeout")]
    pub ai_timeout: u64,
    /// Upper bound on the page text sent to the model
    #[serde(default = "default_max_page_text_chars")]
    pub max_page_text_chars: usize,
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(model: impl Into<String>) -> Self {
        ProviderConfig {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            default_provider: default_provider(),
            providers: HashMap::new(),
            fetch_timeout: default_fetch_timeout(),
            ai_timeout: default_ai_timeout(),
            max_page_text_chars: default_max_page_text_chars(),
        }
    }
}

fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_ai_timeout() -> u64 {
    30
}

fn default_max_page_text_chars() -> usize {
    50_000
}

/// Model used when the default provider has no explicit entry.
pub fn default_model_for(provider: &str) -> &'static str {
    match provider {
        "openai" => "gpt-4o-mini",
        _ => "claude-sonnet-4-5",
    }
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. recipe-import.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_IMPORT__PROVIDERS__ANTHROPIC__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout)
    }

    /// Settings for the default provider, synthesized when the file names none.
    pub fn default_provider_config(&self) -> ProviderConfig {
        self.providers
            .get(&self.default_provider)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::new(default_model_for(&self.default_provider)))
    }
}

/// Load configuration from file and environment variables.
///
/// Environment variable format: RECIPE_IMPORT__PROVIDERS__ANTHROPIC__API_KEY
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-import").required(false))
        // Use double underscore for nested: RECIPE_IMPORT__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_IMPORT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ImportConfig::default();
        assert_eq!(config.default_provider, "anthropic");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.ai_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_page_text_chars, 50_000);
    }

    #[test]
    fn test_default_provider_config_synthesized() {
        let config = ImportConfig::default();
        let provider = config.default_provider_config();
        assert!(provider.enabled);
        assert_eq!(provider.model, "claude-sonnet-4-5");
        assert!(provider.api_key.is_none());
    }

    #[test]
    fn test_default_provider_config_from_map() {
        let mut config = ImportConfig {
            default_provider: "openai".to_string(),
            ..Default::default()
        };
        let mut openai = ProviderConfig::new("gpt-4.1-mini");
        openai.api_key = Some("test-key".to_string());
        config.providers.insert("openai".to_string(), openai);

        let provider = config.default_provider_config();
        assert_eq!(provider.model, "gpt-4.1-mini");
        assert_eq!(provider.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                r#"
                default_provider = "openai"
                ai_timeout = 20

                [providers.openai]
                model = "gpt-4o"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: ImportConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.ai_timeout, 20);
        assert_eq!(config.fetch_timeout, 10);
        assert_eq!(config.providers["openai"].model, "gpt-4o");
        assert!(config.providers["openai"].enabled);
    }
}
