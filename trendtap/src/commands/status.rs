use anyhow::Result;
use trendtap_core::Services;
use uuid::Uuid;

use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli, user_id: Uuid, json: bool) -> Result<()> {
    let config = load_config(&cli.config, true)?;
    let services = Services::new(config).await?;

    let summary = services.events.account_security_summary(user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    match &summary.active_lockout {
        Some(lockout) => {
            println!("Account {user_id} is LOCKED ({:?})", lockout.reason);
            println!("  Locked at: {}", lockout.locked_at);
            match lockout.locked_until {
                Some(until) => println!("  Locked until: {until}"),
                None => println!("  Locked until: permanent"),
            }
            println!("  Reason: {}", lockout.description);
        }
        None => println!("Account {user_id} is not locked"),
    }
    println!("Security score: {}/100", summary.security_score);
    println!(
        "Failed logins (24h): {}",
        summary.failed_attempts_last_24h
    );
    println!("Security events (24h): {}", summary.events_last_24h);
    println!(
        "Suspicious activities (30d): {}",
        summary.suspicious_activities_last_30d
    );
    println!("Unresolved breaches: {}", summary.unresolved_breaches);
    Ok(())
}
