use serde::Deserialize;

use crate::error::ConfigError;

const EMBEDDED_CONFIG: &str = include_str!("../popup.toml");

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct PopupConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    #[default]
    Sync,
    Local,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub area: StorageArea,
    #[serde(default = "default_counter_key")]
    pub counter_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CounterConfig {
    #[serde(default = "default_true")]
    pub serialize_mutations: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MessagingConfig {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_true")]
    pub notify_active_tab: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String, // "error", "warn", "info", "debug", "trace"
}

fn default_counter_key() -> String {
    "count".to_string()
}

fn default_greeting() -> String {
    "Hello, my name is Pop. I am from Popup.".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            area: StorageArea::default(),
            counter_key: default_counter_key(),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            serialize_mutations: true,
        }
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            notify_active_tab: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl PopupConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PopupConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The `popup.toml` bundled into the wasm binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    /// Embedded config, or defaults when it does not load.
    pub fn load_or_default() -> Self {
        match Self::embedded() {
            Ok(config) => config,
            Err(e) => {
                log::error!("Falling back to default popup config: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.counter_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.counter_key must not be empty".to_string(),
            ));
        }

        if self.messaging.greeting.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "messaging.greeting must not be empty".to_string(),
            ));
        }

        self.log_level()?;

        Ok(())
    }

    pub fn log_level(&self) -> Result<log::Level, ConfigError> {
        self.logging.level.parse::<log::Level>().map_err(|_| {
            ConfigError::Invalid(format!("unknown log level: {}", self.logging.level))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_loads() {
        let config = PopupConfig::embedded().unwrap();
        assert_eq!(config.storage.area, StorageArea::Sync);
        assert_eq!(config.storage.counter_key, "count");
        assert!(config.counter.serialize_mutations);
        assert_eq!(config.log_level().unwrap(), log::Level::Info);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = PopupConfig::from_toml_str("").unwrap();
        assert_eq!(config, PopupConfig::default());
    }

    #[test]
    fn test_local_area_and_unguarded_counter() {
        let config = PopupConfig::from_toml_str(
            r#"
            [storage]
            area = "local"

            [counter]
            serialize_mutations = false
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.area, StorageArea::Local);
        assert_eq!(config.storage.counter_key, "count");
        assert!(!config.counter.serialize_mutations);
    }

    #[test]
    fn test_empty_counter_key_rejected() {
        let err = PopupConfig::from_toml_str(
            r#"
            [storage]
            counter_key = "  "
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let err = PopupConfig::from_toml_str(
            r#"
            [logging]
            level = "loud"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_unknown_storage_area_is_parse_error() {
        let err = PopupConfig::from_toml_str(
            r#"
            [storage]
            area = "session"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
