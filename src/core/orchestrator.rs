use crate::config::HttpSettings;
use crate::core::{
    Broadcaster, DispatchOutcome, HealthChecker, OrchestrationReport, Registry, RegistryStore,
};
use crate::utils::error::{OrchestratorError, Result};
use reqwest::Client;
use std::time::Duration;

/// 先做健康檢查，再廣播 payload；兩個階段共用同一個連線池
pub struct Orchestrator {
    health: HealthChecker,
    broadcaster: Broadcaster,
}

impl Orchestrator {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            health: HealthChecker::with_client(client.clone(), settings.clone()),
            broadcaster: Broadcaster::with_client(client, settings),
        })
    }

    /// 從持久化來源載入登記表；檔案不存在時回傳 `RegistryNotFound`
    pub async fn load_registry<S: RegistryStore>(store: &S, location: &str) -> Result<Registry> {
        match store.load().await? {
            Some(registry) => Ok(registry),
            None => Err(OrchestratorError::RegistryNotFound {
                path: location.to_string(),
            }),
        }
    }

    pub async fn run(
        &self,
        registry: &Registry,
        payload: &serde_json::Value,
        timeout: Duration,
    ) -> OrchestrationReport {
        for (name, port) in registry.iter() {
            tracing::info!("{} found on port {}", name, port);
        }

        let health = self.health.check_all(registry, timeout).await;

        tracing::info!("Sending payload to all units...");
        let dispatch = self.broadcaster.send_all(registry, payload, timeout).await;
        for result in &dispatch {
            match &result.outcome {
                DispatchOutcome::Success(value) => {
                    tracing::info!("Results from {}: {}", result.unit_name, value)
                }
                other => tracing::info!("Results from {}: {:?}", result.unit_name, other),
            }
        }

        let report = OrchestrationReport { health, dispatch };
        tracing::info!(
            "Orchestrator run complete: {}/{} healthy, {}/{} dispatched",
            report.healthy_count(),
            report.health.len(),
            report.success_count(),
            report.dispatch.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HealthStatus;
    use httpmock::prelude::*;

    struct MemoryStore(Option<Registry>);

    impl RegistryStore for MemoryStore {
        async fn load(&self) -> Result<Option<Registry>> {
            Ok(self.0.clone())
        }

        async fn save(&self, _registry: &Registry) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_missing_registry_is_an_error() {
        let result = Orchestrator::load_registry(&MemoryStore(None), "container_ports.json").await;
        assert!(matches!(result, Err(OrchestratorError::RegistryNotFound { .. })));
    }

    #[tokio::test]
    async fn test_run_checks_then_dispatches() {
        let server = MockServer::start();
        let health_mock = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(serde_json::json!({"status": "healthy"}));
        });
        let smi_mock = server.mock(|when, then| {
            when.method(POST).path("/smi");
            then.status(200).json_body(serde_json::json!({"result": "ok"}));
        });

        let mut registry = Registry::new();
        registry.insert("model", server.port()).unwrap();
        let registry = Orchestrator::load_registry(&MemoryStore(Some(registry)), "memory")
            .await
            .unwrap();

        let orchestrator = Orchestrator::new(HttpSettings {
            host: "127.0.0.1".to_string(),
            ..HttpSettings::default()
        })
        .unwrap();
        let report = orchestrator
            .run(
                &registry,
                &serde_json::json!({"smiles": "C1=CC=CC=C1"}),
                Duration::from_secs(2),
            )
            .await;

        health_mock.assert();
        smi_mock.assert();
        assert_eq!(report.health[0].status, HealthStatus::Healthy);
        assert_eq!(report.healthy_count(), 1);
        assert_eq!(report.success_count(), 1);
    }
}
