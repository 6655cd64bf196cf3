use crate::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, ParseMode};
use crate::utils::error::{IndexError, Result};
use crate::utils::validation::{
    validate_distinct_paths, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub index: IndexSection,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parse: ParseConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_INPUT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseConfig {
    #[serde(default)]
    pub mode: ParseMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| IndexError::ConfigError {
                message: format!(
                    "Cannot read config file '{}': {}",
                    path.as_ref().display(),
                    e
                ),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IndexError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| IndexError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("index.name", &self.index.name)?;
        validate_path("input.path", &self.input.path)?;
        validate_path("output.path", &self.output.path)?;
        validate_distinct_paths(&self.input.path, &self.output.path)?;

        if let Some(format) = self.log_format() {
            if !matches!(format, "compact" | "json") {
                return Err(IndexError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Supported formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_format(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_format.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format() == Some("json")
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn parse_mode(&self) -> ParseMode {
        self.parse.mode
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
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
[index]
name = "vehicles"
description = "Marketplace make/model lookup"

[input]
path = "data/makes_data.txt"

[output]
path = "data/make_model.csv"
format = "csv"

[parse]
mode = "collect"

[monitoring]
enabled = true
log_format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.index.name, "vehicles");
        assert_eq!(config.input_path(), "data/makes_data.txt");
        assert_eq!(config.output_path(), "data/make_model.csv");
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert_eq!(config.parse_mode(), ParseMode::Collect);
        assert!(config.monitoring_enabled());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_default_to_generator_paths() {
        let config = TomlConfig::from_toml_str("[index]\nname = \"minimal\"\n").unwrap();

        assert_eq!(config.input_path(), DEFAULT_INPUT_PATH);
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.parse_mode(), ParseMode::FailFast);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MMI_TEST_DATA_DIR", "/srv/vehicles");
        let toml_content = r#"
[index]
name = "vehicles"

[input]
path = "${MMI_TEST_DATA_DIR}/makes_data.txt"

[output]
path = "${MMI_TEST_UNSET_DIR}/make_model.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), "/srv/vehicles/makes_data.txt");
        assert_eq!(config.output_path(), "${MMI_TEST_UNSET_DIR}/make_model.json");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_format = TomlConfig::from_toml_str(
            "[index]\nname = \"x\"\n[output]\npath = \"o.json\"\nformat = \"xml\"\n",
        );
        assert!(matches!(
            bad_format,
            Err(IndexError::ConfigValidationError { .. })
        ));

        let bad_log = TomlConfig::from_toml_str(
            "[index]\nname = \"x\"\n[monitoring]\nenabled = false\nlog_format = \"xml\"\n",
        )
        .unwrap();
        assert!(bad_log.validate().is_err());

        let blank_name = TomlConfig::from_toml_str("[index]\nname = \"  \"\n").unwrap();
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[index]\nname = \"from-file\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.index.name, "from-file");

        let err = TomlConfig::from_file("/no/such/config.toml").unwrap_err();
        assert!(matches!(err, IndexError::ConfigError { .. }));
        assert_eq!(err.severity().exit_code(), 2);
    }
}
