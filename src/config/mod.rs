#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
pub use cli::{AssignArgs, OrchestrateArgs};
pub use toml_config::OrchestratorConfig;

pub const DEFAULT_START_PORT: u16 = 18000;
pub const DEFAULT_MAX_ATTEMPTS: u16 = 100;
pub const DEFAULT_REGISTRY_PATH: &str = "container_ports.json";
pub const DEFAULT_CONTAINERS_DIR: &str = "containers";
pub const DEFAULT_SMILES: &str = "C1=CC=CC=C1";

/// 健康檢查與廣播共用的 HTTP 設定，於建構時傳入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub host: String,
    pub health_path: String,
    pub process_path: String,
    pub concurrency: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            health_path: "/health".to_string(),
            process_path: "/smi".to_string(),
            concurrency: 4,
        }
    }
}
