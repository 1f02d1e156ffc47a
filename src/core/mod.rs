pub mod allocator;
pub mod broadcast;
pub mod fanout;
pub mod health;
pub mod orchestrator;

pub use crate::domain::model::{
    DispatchOutcome, DispatchResult, HealthResult, HealthStatus, OrchestrationReport, Registry,
    SmilesRequest, Unit,
};
pub use crate::domain::ports::{PortProbe, RegistryStore, UnitCall};
pub use crate::utils::error::Result;

pub use allocator::PortAllocator;
pub use broadcast::Broadcaster;
pub use health::HealthChecker;
pub use orchestrator::Orchestrator;
