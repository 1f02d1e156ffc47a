pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{AssignArgs, OrchestrateArgs};

pub use adapters::{ContainerDiscovery, JsonSidecar, TcpBindProbe};
pub use config::{HttpSettings, OrchestratorConfig};
pub use crate::core::{
    Broadcaster, DispatchOutcome, DispatchResult, HealthChecker, HealthResult, HealthStatus,
    OrchestrationReport, Orchestrator, PortAllocator, Registry, SmilesRequest, Unit,
};
pub use utils::error::{OrchestratorError, Result};
