use anyhow::Result;
use tracing::*;
use trendtap_core::Services;
use uuid::Uuid;

use crate::config::load_config;

pub(crate) async fn command(
    cli: &crate::Cli,
    user_id: Option<Uuid>,
    token: Option<&str>,
    reason: &str,
) -> Result<()> {
    let config = load_config(&cli.config, true)?;
    let services = Services::new(config).await?;

    if let Some(token) = token {
        let lockout = services.lockout.redeem_unlock_token(token).await?;
        info!(user_id = %lockout.user_id, "Account unlocked");
        return Ok(());
    }

    let Some(user_id) = user_id else {
        anyhow::bail!("Provide a user id or an unlock token");
    };

    if services.lockout.unlock_account(user_id, reason).await? {
        info!(user_id = %user_id, "Account unlocked");
    } else {
        info!(user_id = %user_id, "No active lockout for this account");
    }
    Ok(())
}
