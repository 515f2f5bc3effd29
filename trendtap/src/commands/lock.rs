use std::time::Duration;

use anyhow::Result;
use tracing::*;
use trendtap_core::lockout::LockRequest;
use trendtap_core::Services;
use trendtap_db_entities::AccountLockout::LockoutReason;
use uuid::Uuid;

use crate::config::load_config;

pub(crate) async fn command(
    cli: &crate::Cli,
    user_id: Uuid,
    reason: &str,
    duration: Option<Duration>,
    permanent: bool,
    locked_by: Option<Uuid>,
) -> Result<()> {
    let config = load_config(&cli.config, true)?;
    let services = Services::new(config).await?;

    let lockout = services
        .lockout
        .lock_account(LockRequest {
            user_id,
            reason: LockoutReason::AdminLock,
            description: reason.to_owned(),
            duration,
            is_permanent: permanent,
            locked_by,
        })
        .await?;

    if lockout.is_permanent {
        info!(user_id = %user_id, "Account locked permanently");
    } else {
        info!(user_id = %user_id, locked_until = ?lockout.locked_until, "Account locked");
        println!("Unlock token: {}", lockout.unlock_token);
    }
    Ok(())
}
