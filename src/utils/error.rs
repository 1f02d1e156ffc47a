use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("No units discovered: nothing to allocate ports for")]
    DiscoveryEmpty,

    #[error("Could not find an available port for '{unit}' in range {start_port}-{end_port}")]
    AllocationExhausted {
        unit: String,
        start_port: u16,
        end_port: u16,
    },

    #[error("No ports left for '{unit}': port {last_port} was the last one to try")]
    PortRangeExhausted { unit: String, last_port: u16 },

    #[error("Discovery error: {message}")]
    DiscoveryError { message: String },

    #[error("Port registry not found: {path}")]
    RegistryNotFound { path: String },

    #[error("Invalid port registry: {message}")]
    InvalidRegistry { message: String },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Allocation,
    Discovery,
    Registry,
    Network,
    Io,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定的程序退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl OrchestratorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DiscoveryEmpty | Self::DiscoveryError { .. } => ErrorCategory::Discovery,
            Self::AllocationExhausted { .. } | Self::PortRangeExhausted { .. } => {
                ErrorCategory::Allocation
            }
            Self::RegistryNotFound { .. } | Self::InvalidRegistry { .. } => {
                ErrorCategory::Registry
            }
            Self::HttpError(_) => ErrorCategory::Network,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HttpError(_) => ErrorSeverity::Medium,
            Self::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::DiscoveryEmpty => {
                "Place at least one container artifact in the containers directory".to_string()
            }
            Self::AllocationExhausted { start_port, .. } => format!(
                "Free some ports or widen the search (raise --max-attempts or move --start-port away from {})",
                start_port
            ),
            Self::PortRangeExhausted { .. } => {
                "Lower --start-port so every container fits below 65536".to_string()
            }
            Self::DiscoveryError { .. } => {
                "Check the --dir argument points at an existing directory".to_string()
            }
            Self::RegistryNotFound { .. } => {
                "Run assign-ports first to generate the port registry".to_string()
            }
            Self::InvalidRegistry { .. } | Self::SerializationError(_) => {
                "Regenerate the port registry with assign-ports".to_string()
            }
            Self::HttpError(_) => "Check that the HTTP client can be created".to_string(),
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and ORCH_* environment variables".to_string()
            }
            Self::ValidationError { .. } => "Fix the reported input and retry".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::AllocationExhausted { unit, .. } | Self::PortRangeExhausted { unit, .. } => {
                format!("Failed to assign a port to '{}': {}", unit, self)
            }
            Self::RegistryNotFound { path } => {
                format!("Port configuration '{}' does not exist", path)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_exhausted_names_unit() {
        let err = OrchestratorError::AllocationExhausted {
            unit: "chemprop".to_string(),
            start_port: 18000,
            end_port: 18099,
        };

        assert!(err.to_string().contains("chemprop"));
        assert!(err.user_friendly_message().contains("chemprop"));
        assert_eq!(err.category(), ErrorCategory::Allocation);
        assert_eq!(err.severity().exit_code(), 1);
    }

    #[test]
    fn test_fatal_errors_exit_non_zero() {
        assert_ne!(OrchestratorError::DiscoveryEmpty.severity().exit_code(), 0);
        let missing = OrchestratorError::RegistryNotFound {
            path: "container_ports.json".to_string(),
        };
        assert_ne!(missing.severity().exit_code(), 0);
        assert_eq!(missing.category(), ErrorCategory::Registry);
    }

    #[test]
    fn test_every_severity_has_failing_exit_code() {
        for severity in [ErrorSeverity::Medium, ErrorSeverity::High, ErrorSeverity::Critical] {
            assert!(severity.exit_code() > 0, "{:?}", severity);
        }
    }

    #[test]
    fn test_port_range_exhausted_message() {
        let err = OrchestratorError::PortRangeExhausted {
            unit: "tox21".to_string(),
            last_port: 65535,
        };

        assert!(err.user_friendly_message().contains("tox21"));
        assert!(err.to_string().contains("65535"));
        assert_eq!(err.category(), ErrorCategory::Allocation);
    }
}
