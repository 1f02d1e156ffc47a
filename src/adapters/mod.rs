// Adapters layer: concrete implementations for external systems (sockets, files, directories).

pub mod discovery;
pub mod probe;
pub mod sidecar;

pub use discovery::ContainerDiscovery;
pub use probe::TcpBindProbe;
pub use sidecar::JsonSidecar;
