use anyhow::Context;
use clap::Parser;
use model_orchestrator::utils::{logger, validation::Validate};
use model_orchestrator::{JsonSidecar, OrchestrateArgs, Orchestrator, OrchestratorConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = OrchestrateArgs::parse();

    let mut config = match &args.config {
        Some(path) => OrchestratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => OrchestratorConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("Invalid ORCH_* environment variable")?;

    // 命令列覆蓋設定
    if let Some(ports_file) = &args.ports_file {
        config.registry.path = ports_file.clone();
    }
    if let Some(smiles) = &args.smiles {
        config.payload.smiles = smiles.clone();
    }

    let level = (!args.verbose).then(|| config.logging.filter_level().to_string());
    if args.json_logs || config.logging.json {
        logger::init_json_logger(level.as_deref());
    } else {
        logger::init_cli_logger(args.verbose, level.as_deref());
    }

    tracing::info!("Starting orchestrator");

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = JsonSidecar::new(&config.registry.path);
    let registry = match Orchestrator::load_registry(&store, &config.registry.path).await {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("❌ {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    let orchestrator = Orchestrator::new(config.http.settings.clone())?;
    let report = orchestrator
        .run(&registry, &config.payload(), config.request_timeout())
        .await;

    tracing::debug!("Report: {}", serde_json::to_string(&report)?);
    Ok(())
}
