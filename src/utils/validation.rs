use crate::utils::error::{OrchestratorError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 主機名稱只能是單純的 host（名稱、IPv4 或帶中括號的 IPv6），不可夾帶埠號或路徑
pub fn validate_host(field_name: &str, host: &str) -> Result<()> {
    let invalid = |reason: String| OrchestratorError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: host.to_string(),
        reason,
    };

    if host.trim().is_empty() {
        return Err(invalid("Host cannot be empty".to_string()));
    }

    let url = Url::parse(&format!("http://{}/", host))
        .map_err(|e| invalid(format!("Invalid host: {}", e)))?;
    if url.host_str().is_none() || url.port().is_some() || url.path() != "/" {
        return Err(invalid("Expected a bare host name or IP address".to_string()));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OrchestratorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(OrchestratorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(OrchestratorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OrchestratorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(OrchestratorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
