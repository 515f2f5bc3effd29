use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use trendtap_common::TrendTapError;
use trendtap_db_entities::SecurityEvent::SecurityEventKind;
use trendtap_db_entities::{AccountLockout, FailedLoginAttempt, SecurityEvent, SuspiciousActivity};
use uuid::Uuid;

use super::log::SecurityEventLog;

/// Recent negative signals for one account, plus the derived score.
#[derive(Clone, Debug, Serialize)]
pub struct AccountSecuritySummary {
    pub user_id: Uuid,
    pub failed_attempts_last_24h: u64,
    pub events_last_24h: u64,
    pub suspicious_activities_last_30d: u64,
    pub unresolved_breaches: u64,
    pub active_lockout: Option<AccountLockout::Model>,
    pub security_score: u8,
}

/// Linear 0..=100 heuristic: 100 minus a capped penalty per signal class.
/// Not a calibrated risk model.
pub fn security_score(
    failed_attempts: u64,
    suspicious_activities: u64,
    unresolved_breaches: u64,
    currently_locked: bool,
) -> u8 {
    let mut penalty = failed_attempts.saturating_mul(5).min(30);
    penalty += suspicious_activities.saturating_mul(10).min(40);
    penalty += unresolved_breaches.saturating_mul(20).min(40);
    if currently_locked {
        penalty += 30;
    }
    100u64.saturating_sub(penalty) as u8
}

impl SecurityEventLog {
    /// Aggregate the account's recent security posture in one pass.
    pub async fn account_security_summary(
        &self,
        user_id: Uuid,
    ) -> Result<AccountSecuritySummary, TrendTapError> {
        let db = self.db.lock().await;
        let now = Utc::now();

        let failed_attempts_last_24h = FailedLoginAttempt::Entity::find()
            .filter(FailedLoginAttempt::Column::UserId.eq(user_id))
            .filter(FailedLoginAttempt::Column::CreatedAt.gte(now - chrono::Duration::hours(24)))
            .count(&*db)
            .await?;

        let events_last_24h = SecurityEvent::Entity::find()
            .filter(SecurityEvent::Column::UserId.eq(user_id))
            .filter(SecurityEvent::Column::CreatedAt.gte(now - chrono::Duration::hours(24)))
            .count(&*db)
            .await?;

        let suspicious_activities_last_30d = SuspiciousActivity::Entity::find()
            .filter(SuspiciousActivity::Column::UserId.eq(user_id))
            .filter(SuspiciousActivity::Column::CreatedAt.gte(now - chrono::Duration::days(30)))
            .count(&*db)
            .await?;

        let unresolved_breaches = SecurityEvent::Entity::find()
            .filter(SecurityEvent::Column::UserId.eq(user_id))
            .filter(SecurityEvent::Column::Kind.eq(SecurityEventKind::PasswordBreach))
            .filter(SecurityEvent::Column::Resolved.eq(false))
            .count(&*db)
            .await?;

        let active_lockout = AccountLockout::Entity::find()
            .filter(AccountLockout::Column::UserId.eq(user_id))
            .filter(AccountLockout::Column::IsActive.eq(true))
            .order_by_desc(AccountLockout::Column::LockedAt)
            .all(&*db)
            .await?
            .into_iter()
            .find(|lockout| lockout.is_locked_at(now));

        let security_score = security_score(
            failed_attempts_last_24h,
            suspicious_activities_last_30d,
            unresolved_breaches,
            active_lockout.is_some(),
        );

        Ok(AccountSecuritySummary {
            user_id,
            failed_attempts_last_24h,
            events_last_24h,
            suspicious_activities_last_30d,
            unresolved_breaches,
            active_lockout,
            security_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sea_orm::{ConnectOptions, Database};
    use tokio::sync::Mutex;
    use trendtap_common::LockoutConfig;
    use trendtap_db_migrations::migrate_database;

    use super::*;
    use crate::lockout::{FailedLogin, LockoutLedger, SuspiciousActivityReport};

    #[test]
    fn test_clean_account_scores_100() {
        assert_eq!(security_score(0, 0, 0, false), 100);
    }

    #[test]
    fn test_each_penalty_is_capped() {
        assert_eq!(security_score(100, 0, 0, false), 70);
        assert_eq!(security_score(0, 100, 0, false), 60);
        assert_eq!(security_score(0, 0, 100, false), 60);
    }

    #[test]
    fn test_lock_costs_a_flat_30() {
        assert_eq!(security_score(0, 0, 0, true), 70);
    }

    #[test]
    fn test_score_floors_at_zero() {
        assert_eq!(security_score(100, 100, 100, true), 0);
    }

    #[test]
    fn test_partial_penalties_add_up() {
        // 100 - 5*2 - 10*1 - 20*1
        assert_eq!(security_score(2, 1, 1, false), 60);
    }

    #[test]
    fn test_more_signals_never_raise_the_score() {
        let base = security_score(1, 1, 0, false);
        assert!(security_score(2, 1, 0, false) <= base);
        assert!(security_score(1, 2, 0, false) <= base);
        assert!(security_score(1, 1, 1, false) <= base);
        assert!(security_score(1, 1, 0, true) <= base);
    }

    #[tokio::test]
    async fn test_summary_aggregates_all_signal_classes() {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        migrate_database(&db).await.unwrap();
        let db = Arc::new(Mutex::new(db));

        let ledger = LockoutLedger::new(LockoutConfig::default(), db.clone());
        let log = SecurityEventLog::new(db);
        let user_id = Uuid::new_v4();

        for _ in 0..2 {
            ledger
                .record_failed_login(FailedLogin {
                    user_id: Some(user_id),
                    email: "user@example.com".into(),
                    remote_ip: "10.0.0.1".into(),
                    user_agent: None,
                    reason: Some("invalid_password".into()),
                })
                .await
                .unwrap();
        }
        ledger
            .record_suspicious_activity(SuspiciousActivityReport {
                user_id: Some(user_id),
                activity_type: "new_device".into(),
                description: "Login from unseen device".into(),
                remote_ip: None,
                risk_score: 10,
            })
            .await
            .unwrap();
        let (breach, _) = ledger
            .record_password_breach(user_id, "combo_list")
            .await
            .unwrap();

        let summary = log.account_security_summary(user_id).await.unwrap();
        assert_eq!(summary.failed_attempts_last_24h, 2);
        assert_eq!(summary.suspicious_activities_last_30d, 1);
        assert_eq!(summary.unresolved_breaches, 1);
        // suspicious_activity + password_breach + account_locked
        assert_eq!(summary.events_last_24h, 3);
        assert!(summary.active_lockout.is_some());
        // 100 - 10 - 10 - 20 - 30
        assert_eq!(summary.security_score, 30);

        log.resolve_breach(breach.id).await.unwrap();
        ledger.unlock_account(user_id, "remediated").await.unwrap();

        let after = log.account_security_summary(user_id).await.unwrap();
        assert_eq!(after.unresolved_breaches, 0);
        assert!(after.active_lockout.is_none());
        // unlock also dropped the attempt rows
        assert_eq!(after.failed_attempts_last_24h, 0);
        assert_eq!(after.security_score, 90);
    }
}
