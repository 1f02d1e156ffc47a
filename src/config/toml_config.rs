use crate::config::{HttpSettings, DEFAULT_REGISTRY_PATH, DEFAULT_SMILES};
use crate::utils::error::{OrchestratorError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const TIMEOUT_ENV: &str = "ORCH_REQUEST_TIMEOUT";
pub const LOG_LEVEL_ENV: &str = "ORCH_LOGLEVEL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub registry: RegistryConfig,
    pub http: HttpConfig,
    pub payload: PayloadConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub path: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_REGISTRY_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: f64,
    #[serde(flatten)]
    pub settings: HttpSettings,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5.0,
            settings: HttpSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    pub smiles: String,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            smiles: DEFAULT_SMILES.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl OrchestratorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OrchestratorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OrchestratorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_HOST})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OrchestratorError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用 `ORCH_REQUEST_TIMEOUT` 與 `ORCH_LOGLEVEL`
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.http.timeout_seconds = raw.trim().parse::<f64>().map_err(|_| {
                OrchestratorError::InvalidConfigValueError {
                    field: TIMEOUT_ENV.to_string(),
                    value: raw.clone(),
                    reason: "Expected a number of seconds".to_string(),
                }
            })?;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = level.trim().to_lowercase();
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.http.timeout_seconds)
            .unwrap_or_else(|_| Duration::from_secs(5))
    }

    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({ "smiles": self.payload.smiles })
    }
}

impl Validate for OrchestratorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("registry.path", &self.registry.path)?;
        validation::validate_range("http.timeout_seconds", self.http.timeout_seconds, 0.001, 3600.0)?;
        validation::validate_positive_number("http.concurrency", self.http.settings.concurrency, 1)?;
        validation::validate_host("http.host", &self.http.settings.host)?;
        for (field, path) in [
            ("http.health_path", &self.http.settings.health_path),
            ("http.process_path", &self.http.settings.process_path),
        ] {
            if !path.starts_with('/') {
                return Err(OrchestratorError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: path.clone(),
                    reason: "Path must start with '/'".to_string(),
                });
            }
        }
        validation::validate_non_empty_string("payload.smiles", &self.payload.smiles)?;

        let levels = ["trace", "debug", "info", "warn", "warning", "error"];
        if !levels.contains(&self.logging.level.as_str()) {
            return Err(OrchestratorError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Valid levels: {}", levels.join(", ")),
            });
        }
        Ok(())
    }
}

impl LoggingConfig {
    /// `tracing` 沒有 warning 這個等級，轉成 warn
    pub fn filter_level(&self) -> &str {
        match self.level.as_str() {
            "warning" => "warn",
            other => other,
        }
    }
}
