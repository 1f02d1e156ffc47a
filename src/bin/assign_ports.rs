use clap::Parser;
use model_orchestrator::core::RegistryStore;
use model_orchestrator::utils::{logger, validation::Validate};
use model_orchestrator::{
    AssignArgs, ContainerDiscovery, JsonSidecar, OrchestratorError, PortAllocator, Registry,
    TcpBindProbe,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = AssignArgs::parse();

    logger::init_cli_logger(args.verbose, None);
    tracing::debug!("CLI args: {:?}", args);

    match assign(&args).await {
        Ok(registry) => {
            // stdout 只輸出登記表本身，方便其他工具接手
            println!("{}", serde_json::to_string_pretty(&registry)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "[!] Failed to assign ports: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn assign(args: &AssignArgs) -> Result<Registry, OrchestratorError> {
    args.validate()?;

    tracing::info!("[+] Assigning ports to containers in {}...", args.dir);
    let names = ContainerDiscovery::new(&args.dir)
        .with_extension(&args.extension)
        .discover()?;

    let allocator = PortAllocator::new(TcpBindProbe::localhost());
    let registry = allocator.allocate(&names, args.start_port, args.max_attempts)?;

    JsonSidecar::new(&args.output).save(&registry).await?;
    Ok(registry)
}
