use crate::utils::error::{OrchestratorError, Result};
use crate::utils::validation::Validate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 一個可被定址的服務單元（例如一個容器化模型）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub port: Option<u16>,
}

impl Unit {
    pub fn new(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port: Some(port),
        }
    }

    pub fn unassigned(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port: None,
        }
    }
}

/// 單元名稱到埠號的有序對應，保留插入（或檔案）順序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: IndexMap<String, u16>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一個單元；重複的名稱或埠號都會被拒絕
    pub fn insert(&mut self, name: impl Into<String>, port: u16) -> Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(OrchestratorError::InvalidRegistry {
                message: format!("duplicate unit name '{}'", name),
            });
        }
        if let Some(owner) = self.owner_of(port) {
            return Err(OrchestratorError::InvalidRegistry {
                message: format!("port {} already assigned to '{}'", port, owner),
            });
        }
        self.entries.insert(name, port);
        Ok(())
    }

    pub fn port_of(&self, name: &str) -> Option<u16> {
        self.entries.get(name).copied()
    }

    pub fn owner_of(&self, port: u16) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, p)| **p == port)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.entries.iter().map(|(name, &port)| (name.as_str(), port))
    }

    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.values().copied()
    }

    /// 依登記順序轉成單元列表
    pub fn units(&self) -> Vec<Unit> {
        self.iter().map(|(name, port)| Unit::new(name, port)).collect()
    }
}

impl Validate for Registry {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (name, port) in self.iter() {
            if name.trim().is_empty() {
                return Err(OrchestratorError::InvalidRegistry {
                    message: "unit name cannot be empty".to_string(),
                });
            }
            if port == 0 {
                return Err(OrchestratorError::InvalidRegistry {
                    message: format!("unit '{}' has port 0", name),
                });
            }
            if !seen.insert(port) {
                return Err(OrchestratorError::InvalidRegistry {
                    message: format!("port {} is assigned more than once", port),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unreachable,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResult {
    pub unit_name: String,
    pub status: HealthStatus,
    pub detail: Option<String>,
}

impl HealthResult {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Success(serde_json::Value),
    HttpError(u16),
    Invalid(String),
    NetworkError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResult {
    pub unit_name: String,
    pub outcome: DispatchOutcome,
}

impl DispatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Success(_))
    }
}

/// 送往各單元處理端點的請求內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmilesRequest {
    pub smiles: String,
}

impl SmilesRequest {
    pub fn new(smiles: impl Into<String>) -> Self {
        Self {
            smiles: smiles.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrchestrationReport {
    pub health: Vec<HealthResult>,
    pub dispatch: Vec<DispatchResult>,
}

impl OrchestrationReport {
    pub fn healthy_count(&self) -> usize {
        self.health.iter().filter(|r| r.is_healthy()).count()
    }

    pub fn success_count(&self) -> usize {
        self.dispatch.iter().filter(|r| r.is_success()).count()
    }
}
