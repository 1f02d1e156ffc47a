use crate::config::{
    DEFAULT_CONTAINERS_DIR, DEFAULT_MAX_ATTEMPTS, DEFAULT_REGISTRY_PATH, DEFAULT_START_PORT,
};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "assign-ports")]
#[command(about = "Assign ports to containerized models")]
pub struct AssignArgs {
    /// Directory containing container .sif files
    #[arg(long, default_value = DEFAULT_CONTAINERS_DIR)]
    pub dir: String,

    /// Where to write the port registry
    #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
    pub output: String,

    #[arg(long, default_value_t = DEFAULT_START_PORT)]
    pub start_port: u16,

    /// Ports probed per container before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u16,

    /// Container file extension
    #[arg(long, default_value = crate::adapters::discovery::DEFAULT_EXTENSION)]
    pub extension: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for AssignArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dir", &self.dir)?;
        validation::validate_path("output", &self.output)?;
        validation::validate_range("start_port", self.start_port, 1, u16::MAX)?;
        validation::validate_positive_number("max_attempts", usize::from(self.max_attempts), 1)?;
        validation::validate_non_empty_string("extension", &self.extension)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "model-orchestrator")]
#[command(about = "Health-check containerized models and broadcast a SMILES string to all of them")]
pub struct OrchestrateArgs {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the port registry path
    #[arg(long)]
    pub ports_file: Option<String>,

    /// Override the SMILES string sent to every model
    #[arg(long)]
    pub smiles: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
