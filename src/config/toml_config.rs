use crate::config::ClientSettings;
use crate::core::{ConfigProvider, Resource, SortKey};
use crate::utils::error::{FlyffError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub batch: BatchConfig,
    pub dump: DumpConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub content_type: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub pass_through_not_found: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub chunk_size: Option<usize>,
    pub length_threshold: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    pub output_path: Option<String>,
    pub resources: Option<Vec<String>>,
    pub sort_by: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FlyffError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FlyffError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlyffError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Fills every unset value from the defaults and parses the named resources.
    pub fn to_settings(&self) -> Result<ClientSettings> {
        let defaults = ClientSettings::default();

        let resources = match &self.dump.resources {
            Some(names) => names
                .iter()
                .map(|name| name.parse())
                .collect::<Result<Vec<Resource>>>()?,
            None => defaults.resources,
        };
        let sort_by = self.dump.sort_by.as_deref().map(str::parse::<SortKey>).transpose()?;

        Ok(ClientSettings {
            base_url: self.api.base_url.clone().unwrap_or(defaults.base_url),
            content_type: self.api.content_type.clone().unwrap_or(defaults.content_type),
            chunk_size: self.batch.chunk_size.unwrap_or(defaults.chunk_size),
            length_threshold: self
                .batch
                .length_threshold
                .unwrap_or(defaults.length_threshold),
            timeout_seconds: self.api.timeout_seconds.or(defaults.timeout_seconds),
            pass_through_not_found: self
                .api
                .pass_through_not_found
                .unwrap_or(defaults.pass_through_not_found),
            output_path: self.dump.output_path.clone().unwrap_or(defaults.output_path),
            resources,
            sort_by,
        })
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .unwrap_or(crate::core::transport::DEFAULT_BASE_URL)
    }

    fn content_type(&self) -> &str {
        self.api
            .content_type
            .as_deref()
            .unwrap_or(crate::core::transport::DEFAULT_CONTENT_TYPE)
    }

    fn chunk_size(&self) -> usize {
        self.batch
            .chunk_size
            .unwrap_or(crate::core::batch::DEFAULT_CHUNK_SIZE)
    }

    fn length_threshold(&self) -> usize {
        self.batch
            .length_threshold
            .unwrap_or(crate::core::batch::DEFAULT_LENGTH_THRESHOLD)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.api.timeout_seconds
    }

    fn pass_through_not_found(&self) -> bool {
        self.api.pass_through_not_found.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_settings()?.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[api]
base_url = "http://localhost:8080/"
timeout_seconds = 30
pass_through_not_found = false

[batch]
chunk_size = 50
length_threshold = 200

[dump]
output_path = "./out"
resources = ["item", "monsters", "pk"]
sort_by = "level"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.chunk_size(), 50);
        assert!(!config.pass_through_not_found());

        let settings = config.to_settings().unwrap();
        assert_eq!(settings.base_url, "http://localhost:8080/");
        assert_eq!(settings.timeout_seconds, Some(30));
        assert_eq!(settings.length_threshold, 200);
        assert_eq!(
            settings.resources,
            vec![Resource::Item, Resource::Monster, Resource::Pk]
        );
        assert_eq!(settings.sort_by, Some(SortKey::Level));
        assert_eq!(settings.content_type, "application/json");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let settings = config.to_settings().unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FLYFF_TEST_BASE_URL", "https://mirror.example.com/");

        let toml_content = r#"
[api]
base_url = "${FLYFF_TEST_BASE_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://mirror.example.com/");

        std::env::remove_var("FLYFF_TEST_BASE_URL");
    }

    #[test]
    fn test_unset_env_var_is_left_as_written() {
        std::env::remove_var("FLYFF_TEST_UNSET_OUTPUT");

        let config = TomlConfig::from_toml_str(
            r#"
[dump]
output_path = "${FLYFF_TEST_UNSET_OUTPUT}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.dump.output_path.as_deref(),
            Some("${FLYFF_TEST_UNSET_OUTPUT}")
        );
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "not-a-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[dump]
resources = ["item", "mounts"]
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[batch]\nchunk_size = 25\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.chunk_size(), 25);
    }
}
