use anyhow::Result;
use trendtap_core::events::EventFilter;
use trendtap_core::Services;
use trendtap_db_entities::SecurityEvent::{SecurityEventKind, Severity};
use uuid::Uuid;

use crate::config::load_config;

pub(crate) async fn command(
    cli: &crate::Cli,
    user_id: Option<Uuid>,
    kind: Option<SecurityEventKind>,
    severity: Option<Severity>,
    limit: u64,
    json: bool,
) -> Result<()> {
    let config = load_config(&cli.config, true)?;
    let services = Services::new(config).await?;

    let events = services
        .events
        .query(EventFilter {
            user_id,
            kind,
            severity,
            limit: Some(limit),
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("No events recorded");
        return Ok(());
    }
    for event in events {
        println!(
            "{} [{:?}] {:?} user={} {}",
            event.created_at.format("%Y-%m-%d %H:%M:%S"),
            event.severity,
            event.kind,
            event
                .user_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_owned()),
            event.description,
        );
    }
    Ok(())
}
