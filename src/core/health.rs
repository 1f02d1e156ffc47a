use crate::config::HttpSettings;
use crate::core::fanout::{endpoint_url, fan_out};
use crate::core::{HealthResult, HealthStatus, Registry, Unit, UnitCall};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const HEALTHY_MARKER: &str = "healthy";
const SNIPPET_LEN: usize = 200;

/// 對每個單元的 `/health` 端點做一次健康檢查
pub struct HealthChecker {
    client: Client,
    settings: HttpSettings,
}

impl HealthChecker {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            settings,
        })
    }

    pub fn with_client(client: Client, settings: HttpSettings) -> Self {
        Self { client, settings }
    }

    /// 依登記表順序檢查所有單元，單一單元失敗不影響其他單元
    pub async fn check_all(&self, registry: &Registry, timeout: Duration) -> Vec<HealthResult> {
        let units = registry.units();
        let results = fan_out(self, &units, timeout, self.settings.concurrency).await;

        let healthy = results.iter().filter(|r| r.is_healthy()).count();
        tracing::info!("Health check complete: {}/{} healthy", healthy, results.len());
        results
    }

    fn classify(unit: &Unit, status_code: u16, body: &str) -> HealthResult {
        let (status, detail) = match serde_json::from_str::<serde_json::Value>(body) {
            Err(_) => {
                tracing::warn!("Invalid JSON from {} (port {:?})", unit.name, unit.port);
                (HealthStatus::Invalid, Some(snippet(body)))
            }
            Ok(json) => {
                if json.get("status").and_then(|s| s.as_str()) == Some(HEALTHY_MARKER) {
                    tracing::info!("{} is healthy.", unit.name);
                    (HealthStatus::Healthy, None)
                } else {
                    tracing::warn!("{} is not healthy. Status code: {}", unit.name, status_code);
                    (HealthStatus::Unhealthy, Some(status_code.to_string()))
                }
            }
        };

        HealthResult {
            unit_name: unit.name.clone(),
            status,
            detail,
        }
    }

    fn unreachable(unit: &Unit, message: String) -> HealthResult {
        tracing::error!("Error checking {}: {}", unit.name, message);
        HealthResult {
            unit_name: unit.name.clone(),
            status: HealthStatus::Unreachable,
            detail: Some(message),
        }
    }
}

#[async_trait]
impl UnitCall for HealthChecker {
    type Outcome = HealthResult;

    async fn call(&self, unit: &Unit, timeout: Duration) -> HealthResult {
        let Some(port) = unit.port else {
            return Self::unreachable(unit, "no port assigned".to_string());
        };

        let url = endpoint_url(&self.settings.host, port, &self.settings.health_path);
        tracing::info!("Checking {} on port {}", unit.name, port);

        let response = match self.client.get(&url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => return Self::unreachable(unit, e.to_string()),
        };

        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) => Self::classify(unit, status_code, &body),
            Err(e) => Self::unreachable(unit, e.to_string()),
        }
    }
}

/// 截取回應內容的開頭，避免把整個大型回應塞進結果
fn snippet(body: &str) -> String {
    match body.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
