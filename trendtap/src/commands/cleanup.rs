use anyhow::Result;
use tracing::*;
use trendtap_core::Services;

use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli) -> Result<()> {
    let config = load_config(&cli.config, true)?;
    let services = Services::new(config).await?;

    let stats = services.lockout.cleanup_expired().await?;
    info!(
        expired_lockouts = stats.expired_lockouts_closed,
        old_attempts = stats.old_attempts_removed,
        "Cleanup finished"
    );
    Ok(())
}
