use crate::core::{PortProbe, Registry};
use crate::utils::error::{OrchestratorError, Result};
use std::collections::HashSet;

/// 依序為每個單元尋找可用埠號
///
/// 搜尋游標只會往前推進：每個單元從上一個被指派的埠號之後開始找，
/// 因此同一次執行中不會重複考慮已經指派出去的埠號。
pub struct PortAllocator<P: PortProbe> {
    probe: P,
}

impl<P: PortProbe> PortAllocator<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    pub fn allocate(
        &self,
        unit_names: &[String],
        start_port: u16,
        max_attempts_per_unit: u16,
    ) -> Result<Registry> {
        if unit_names.is_empty() {
            return Err(OrchestratorError::DiscoveryEmpty);
        }
        Self::check_inputs(unit_names, start_port, max_attempts_per_unit)?;

        let mut registry = Registry::new();
        let mut cursor = u32::from(start_port);

        for name in unit_names {
            // 上一個單元拿到 65535 之後已經沒有埠號可找
            let Ok(first) = u16::try_from(cursor) else {
                tracing::error!("✗ No ports left for {} after {}", name, u16::MAX);
                return Err(OrchestratorError::PortRangeExhausted {
                    unit: name.clone(),
                    last_port: u16::MAX,
                });
            };

            let port = match self.find_available_port(cursor, max_attempts_per_unit) {
                Some(port) => port,
                None => {
                    let end = last_port_in_window(first, max_attempts_per_unit);
                    tracing::error!("✗ No available port for {} in {}-{}", name, first, end);
                    return Err(OrchestratorError::AllocationExhausted {
                        unit: name.clone(),
                        start_port: first,
                        end_port: end,
                    });
                }
            };

            registry.insert(name.clone(), port)?;
            tracing::info!("✓ {}: {}", name, port);
            cursor = u32::from(port) + 1;
        }

        Ok(registry)
    }

    /// 在 `[cursor, cursor + max_attempts)` 內找第一個可綁定的埠號，超過 65535 的部分直接截掉
    fn find_available_port(&self, cursor: u32, max_attempts: u16) -> Option<u16> {
        let end = (cursor + u32::from(max_attempts)).min(u32::from(u16::MAX) + 1);
        (cursor..end)
            .filter_map(|port| u16::try_from(port).ok())
            .find(|&port| {
                let free = self.probe.is_free(port);
                tracing::trace!("probe port {} -> {}", port, if free { "free" } else { "busy" });
                free
            })
    }

    fn check_inputs(unit_names: &[String], start_port: u16, max_attempts: u16) -> Result<()> {
        if start_port == 0 {
            return Err(OrchestratorError::InvalidConfigValueError {
                field: "start_port".to_string(),
                value: start_port.to_string(),
                reason: "Port 0 cannot be assigned".to_string(),
            });
        }
        if max_attempts == 0 {
            return Err(OrchestratorError::InvalidConfigValueError {
                field: "max_attempts".to_string(),
                value: max_attempts.to_string(),
                reason: "At least one attempt per unit is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in unit_names {
            if name.trim().is_empty() {
                return Err(OrchestratorError::ValidationError {
                    message: "unit name cannot be empty".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(OrchestratorError::ValidationError {
                    message: format!("duplicate unit name '{}'", name),
                });
            }
        }
        Ok(())
    }
}

/// 掃描範圍的最後一個埠號（含），供錯誤訊息使用
fn last_port_in_window(first: u16, max_attempts: u16) -> u16 {
    first.saturating_add(max_attempts - 1)
}
