use anyhow::Result;
use placeholder_icons::{config, run, CommandInstaller, ImageToolkit, RunOutcome};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Error creating icons: {e:#}");
            println!("💡 Continuing without custom icons - consumers will fall back to default icons");
            return Ok(());
        }
    };

    let installer = CommandInstaller::from_config(&config);
    match run(&config, &ImageToolkit, &installer)? {
        RunOutcome::Generated(paths) => tracing::debug!(count = paths.len(), "icons written"),
        RunOutcome::Degraded(e) => tracing::debug!(error = %e, "icons not written"),
    }

    Ok(())
}
