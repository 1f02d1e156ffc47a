use crate::config::HttpSettings;
use crate::core::fanout::{endpoint_url, fan_out};
use crate::core::{DispatchOutcome, DispatchResult, Registry, Unit, UnitCall};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 把同一份 payload 送到每個單元的處理端點並收集結果
pub struct Broadcaster {
    client: Client,
    settings: HttpSettings,
}

/// 單次廣播，綁定這次要送出的 payload
struct Dispatch<'a> {
    broadcaster: &'a Broadcaster,
    payload: &'a serde_json::Value,
}

impl Broadcaster {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            settings,
        })
    }

    pub fn with_client(client: Client, settings: HttpSettings) -> Self {
        Self { client, settings }
    }

    pub async fn send_all(
        &self,
        registry: &Registry,
        payload: &serde_json::Value,
        timeout: Duration,
    ) -> Vec<DispatchResult> {
        let units = registry.units();
        let dispatch = Dispatch {
            broadcaster: self,
            payload,
        };
        let results = fan_out(&dispatch, &units, timeout, self.settings.concurrency).await;

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        tracing::info!("Broadcast complete: {}/{} succeeded", succeeded, results.len());
        results
    }

    async fn post(&self, unit: &Unit, payload: &serde_json::Value, timeout: Duration) -> DispatchOutcome {
        let Some(port) = unit.port else {
            return DispatchOutcome::NetworkError("no port assigned".to_string());
        };

        let url = endpoint_url(&self.settings.host, port, &self.settings.process_path);
        tracing::info!("Posting payload to {} (port {})", unit.name, port);

        let response = match self.client.post(&url).json(payload).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => return DispatchOutcome::NetworkError(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return DispatchOutcome::HttpError(status.as_u16());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return DispatchOutcome::NetworkError(e.to_string()),
        };

        match serde_json::from_str(&body) {
            Ok(json) => DispatchOutcome::Success(json),
            Err(_) => DispatchOutcome::Invalid(body),
        }
    }
}

#[async_trait]
impl<'a> UnitCall for Dispatch<'a> {
    type Outcome = DispatchResult;

    async fn call(&self, unit: &Unit, timeout: Duration) -> DispatchResult {
        let outcome = self.broadcaster.post(unit, self.payload, timeout).await;

        match &outcome {
            DispatchOutcome::Success(_) => tracing::debug!("{} accepted the payload", unit.name),
            DispatchOutcome::HttpError(code) => {
                tracing::warn!("{} returned status code {}", unit.name, code)
            }
            DispatchOutcome::Invalid(body) => {
                tracing::warn!("Invalid JSON response from {}: {}", unit.name, body)
            }
            DispatchOutcome::NetworkError(message) => {
                tracing::error!("Error posting to {}: {}", unit.name, message)
            }
        }

        DispatchResult {
            unit_name: unit.name.clone(),
            outcome,
        }
    }
}
