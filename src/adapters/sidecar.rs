use crate::core::{Registry, RegistryStore};
use crate::utils::error::{OrchestratorError, Result};
use crate::utils::validation::Validate;
use std::path::{Path, PathBuf};

/// 以 JSON 檔案保存埠號登記表（例如 `container_ports.json`）
#[derive(Debug, Clone)]
pub struct JsonSidecar {
    path: PathBuf,
}

impl JsonSidecar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RegistryStore for JsonSidecar {
    async fn load(&self) -> Result<Option<Registry>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No port registry at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let registry: Registry =
            serde_json::from_str(&content).map_err(|e| OrchestratorError::InvalidRegistry {
                message: format!("{}: {}", self.path.display(), e),
            })?;
        registry.validate()?;

        tracing::debug!("Loaded {} units from {}", registry.len(), self.path.display());
        Ok(Some(registry))
    }

    async fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut json = serde_json::to_string_pretty(registry)?;
        json.push('\n');

        // 先寫暫存檔再改名，避免讀到寫到一半的檔案
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json.as_bytes()).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        tracing::info!("[+] Port configuration saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let sidecar = JsonSidecar::new(temp_dir.path().join("container_ports.json"));

        assert!(sidecar.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let sidecar = JsonSidecar::new(temp_dir.path().join("nested/container_ports.json"));

        let mut registry = Registry::new();
        registry.insert("tox21", 18000).unwrap();
        registry.insert("admet", 18001).unwrap();
        sidecar.save(&registry).await.unwrap();

        let content = std::fs::read_to_string(sidecar.path()).unwrap();
        assert_eq!(content, "{\n  \"tox21\": 18000,\n  \"admet\": 18001\n}\n");
        assert!(!temp_dir.path().join("nested/container_ports.json.tmp").exists());

        let loaded = sidecar.load().await.unwrap().unwrap();
        assert_eq!(loaded, registry);
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("container_ports.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = JsonSidecar::new(&path).load().await;
        assert!(matches!(result, Err(OrchestratorError::InvalidRegistry { .. })));
    }

    #[tokio::test]
    async fn test_load_rejects_duplicate_ports() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("container_ports.json");
        std::fs::write(&path, r#"{"a": 18000, "b": 18000}"#).unwrap();

        let result = JsonSidecar::new(&path).load().await;
        assert!(matches!(result, Err(OrchestratorError::InvalidRegistry { .. })));
    }
}
