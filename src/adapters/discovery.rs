use crate::utils::error::{OrchestratorError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_EXTENSION: &str = "sif";

/// 掃描目錄中的容器檔案，以檔名（去掉副檔名）作為單元名稱
#[derive(Debug, Clone)]
pub struct ContainerDiscovery {
    dir: PathBuf,
    extension: String,
}

impl ContainerDiscovery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// 回傳排序後、不重複的單元名稱；目錄不存在時回傳錯誤，空目錄回傳空列表
    pub fn discover(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(OrchestratorError::DiscoveryError {
                message: format!("Containers directory not found: {}", self.dir.display()),
            });
        }

        let mut names = BTreeSet::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if !matches {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }

        if names.is_empty() {
            tracing::warn!("No .{} files found in {}", self.extension, self.dir.display());
        } else {
            tracing::debug!("Discovered {} units in {}", names.len(), self.dir.display());
        }
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discovers_sorted_stems() {
        let temp_dir = TempDir::new().unwrap();
        for file in ["tox21.sif", "admet.sif", "notes.txt", "chemprop.sif"] {
            fs::write(temp_dir.path().join(file), b"").unwrap();
        }
        fs::create_dir(temp_dir.path().join("nested.sif")).unwrap();

        let names = ContainerDiscovery::new(temp_dir.path()).discover().unwrap();
        assert_eq!(names, vec!["admet", "chemprop", "tox21"]);
    }

    #[test]
    fn test_custom_extension() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("model.img"), b"").unwrap();
        fs::write(temp_dir.path().join("other.sif"), b"").unwrap();

        let names = ContainerDiscovery::new(temp_dir.path())
            .with_extension(".img")
            .discover()
            .unwrap();
        assert_eq!(names, vec!["model"]);
    }

    #[test]
    fn test_empty_directory_yields_no_units() {
        let temp_dir = TempDir::new().unwrap();
        let names = ContainerDiscovery::new(temp_dir.path()).discover().unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ContainerDiscovery::new(temp_dir.path().join("missing")).discover();
        assert!(matches!(result, Err(OrchestratorError::DiscoveryError { .. })));
    }
}
