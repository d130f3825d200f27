mod bootstrap;

use anyhow::Result;
use report_core::settings::Settings;
use report_runtime::config::ReportConfig;
use report_runtime::orchestrator::ReportOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;
    settings.log_persistence_warnings();

    tracing::info!("Usage Report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Digest: {}, Channel: {}, Export: {}",
        settings.digest,
        settings.channel,
        settings.export_format
    );

    let config = ReportConfig::from_settings(&settings)?;
    let mut orchestrator = ReportOrchestrator::from_config(&config);

    let bundle = orchestrator.run().await?;
    tracing::info!(
        current = bundle.metadata.current.records,
        prior = bundle.metadata.prior.records,
        generated_at = %bundle.metadata.generated_at.to_rfc3339(),
        "Report complete"
    );

    Ok(())
}
