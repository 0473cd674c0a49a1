use crate::core::{ConfigProvider, DEFAULT_REGISTRATION_BASE};
use crate::schema::{ExtractOptions, ServerFormat};
use crate::utils::error::{OidDirError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub converter: ConverterConfig,
    pub logging: LoggingConfig,
    pub schema: SchemaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub registration_base: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            registration_base: DEFAULT_REGISTRATION_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub format: ServerFormat,
    pub no_newlines: bool,
    pub custom_syntaxes: bool,
    pub no_extensions: bool,
}

impl From<&SchemaConfig> for ExtractOptions {
    fn from(schema: &SchemaConfig) -> Self {
        ExtractOptions {
            format: schema.format,
            no_newlines: schema.no_newlines,
            custom_syntaxes: schema.custom_syntaxes,
            no_extensions: schema.no_extensions,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OidDirError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OidDirError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REGISTRATION_BASE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OidDirError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_dn(
            "converter.registration_base",
            &self.converter.registration_base,
        )
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::from(&self.schema)
    }
}

impl ConfigProvider for TomlConfig {
    fn registration_base(&self) -> &str {
        &self.converter.registration_base
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
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
[converter]
registration_base = "ou=Arcs,dc=example,dc=com"

[logging]
verbose = true

[schema]
format = "OpenDJ"
custom_syntaxes = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.registration_base(), "ou=Arcs,dc=example,dc=com");
        assert!(config.logging.verbose);
        assert!(!config.logging.json);
        assert_eq!(config.schema.format, ServerFormat::OpenDj);
        assert!(config.extract_options().custom_syntaxes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.registration_base(), DEFAULT_REGISTRATION_BASE);
        assert_eq!(config.schema.format, ServerFormat::OpenLdap);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("OIDDIR_TEST_BASE", "o=FromEnv");

        let toml_content = r#"
[converter]
registration_base = "ou=Registrations,${OIDDIR_TEST_BASE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.registration_base(), "ou=Registrations,o=FromEnv");

        std::env::remove_var("OIDDIR_TEST_BASE");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[converter]
registration_base = "Registrations"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let toml_content = r#"
[schema]
format = "activedirectory"
"#;

        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(OidDirError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[converter]
registration_base = "ou=Registrations,o=RA"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.registration_base(), "ou=Registrations,o=RA");
    }
}
