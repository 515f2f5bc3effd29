use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tokio::sync::Mutex;
use tracing::{debug, info};
use trendtap_common::helpers::rng::generate_unlock_token;
use trendtap_common::{LockoutConfig, TrendTapError};
use trendtap_db_entities::AccountLockout::{self, LockoutReason};
use trendtap_db_entities::SecurityEvent::{self, SecurityEventKind, Severity};
use trendtap_db_entities::{FailedLoginAttempt, SuspiciousActivity};
use uuid::Uuid;

use crate::events::{NewSecurityEvent, SecurityEventLog};
use crate::window_start;

/// One failed authentication, as reported by the caller.
#[derive(Clone, Debug)]
pub struct FailedLogin {
    pub user_id: Option<Uuid>,
    pub email: String,
    pub remote_ip: String,
    pub user_agent: Option<String>,
    pub reason: Option<String>,
}

/// What recording a failed login did.
#[derive(Clone, Debug)]
pub struct FailedLoginOutcome {
    pub attempt: FailedLoginAttempt::Model,
    /// Failures counted against the user inside the configured window,
    /// including this one. Zero when the account is unknown.
    pub attempts_in_window: u64,
    pub lockout: Option<AccountLockout::Model>,
}

/// Parameters for an explicit lock.
#[derive(Clone, Debug)]
pub struct LockRequest {
    pub user_id: Uuid,
    pub reason: LockoutReason,
    pub description: String,
    /// Lockout length; `None` falls back to the configured default.
    /// Ignored for permanent locks.
    pub duration: Option<Duration>,
    pub is_permanent: bool,
    pub locked_by: Option<Uuid>,
}

/// One suspicious occurrence reported by an upstream detector.
#[derive(Clone, Debug)]
pub struct SuspiciousActivityReport {
    pub user_id: Option<Uuid>,
    pub activity_type: String,
    pub description: String,
    pub remote_ip: Option<String>,
    /// Risk on a 0-100 scale. Out-of-range values are clamped before
    /// they are stored or compared.
    pub risk_score: i16,
}

/// Row counts from one maintenance pass.
#[derive(Clone, Debug)]
pub struct CleanupStats {
    pub expired_lockouts_closed: u64,
    pub old_attempts_removed: u64,
}

/// Persists failed logins and lockout episodes and decides when an account
/// transitions between unlocked and locked. Compound writes run inside a
/// single transaction; reads derive "locked right now" lazily through
/// [`AccountLockout::Model::is_locked_at`].
pub struct LockoutLedger {
    config: LockoutConfig,
    db: Arc<Mutex<DatabaseConnection>>,
}

impl LockoutLedger {
    pub fn new(config: LockoutConfig, db: Arc<Mutex<DatabaseConnection>>) -> Self {
        Self { config, db }
    }

    /// Appends a failed-attempt row, flagging it suspicious when the source
    /// IP already crossed the per-IP failure threshold. For a known user,
    /// reaching the windowed attempt threshold locks the account unless it
    /// is locked already.
    pub async fn record_failed_login(
        &self,
        attempt: FailedLogin,
    ) -> Result<FailedLoginOutcome, TrendTapError> {
        let db = self.db.lock().await;
        let txn = db.begin().await?;
        let now = Utc::now();

        let prior_from_ip = FailedLoginAttempt::Entity::find()
            .filter(FailedLoginAttempt::Column::RemoteIp.eq(&attempt.remote_ip))
            .filter(
                FailedLoginAttempt::Column::CreatedAt
                    .gte(window_start(now, self.config.suspicious_ip_window)),
            )
            .count(&txn)
            .await?;
        let suspicious = prior_from_ip > self.config.suspicious_ip_threshold;

        let values = FailedLoginAttempt::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(attempt.user_id),
            email: Set(attempt.email.clone()),
            remote_ip: Set(attempt.remote_ip.clone()),
            user_agent: Set(attempt.user_agent.clone()),
            reason: Set(attempt.reason.clone()),
            suspicious: Set(suspicious),
            created_at: Set(now),
        };
        let record = values.insert(&txn).await?;

        let mut attempts_in_window = 0;
        let mut lockout = None;
        if let Some(user_id) = attempt.user_id {
            attempts_in_window = FailedLoginAttempt::Entity::find()
                .filter(FailedLoginAttempt::Column::UserId.eq(user_id))
                .filter(
                    FailedLoginAttempt::Column::CreatedAt
                        .gte(window_start(now, self.config.failed_attempt_window)),
                )
                .count(&txn)
                .await?;

            if attempts_in_window >= self.config.max_failed_attempts as u64
                && !currently_locked(&txn, user_id, now).await?
            {
                lockout = Some(
                    self.apply_lock(
                        &txn,
                        LockRequest {
                            user_id,
                            reason: LockoutReason::FailedLogin,
                            description: format!(
                                "Exceeded {} failed login attempts",
                                self.config.max_failed_attempts
                            ),
                            duration: Some(self.config.lockout_duration),
                            is_permanent: false,
                            locked_by: None,
                        },
                        now,
                    )
                    .await?,
                );
            }
        }

        txn.commit().await?;

        info!(
            email = %attempt.email,
            ip = %attempt.remote_ip,
            suspicious,
            attempts_in_window,
            locked = lockout.is_some(),
            "Recorded failed login attempt"
        );

        Ok(FailedLoginOutcome {
            attempt: record,
            attempts_in_window,
            lockout,
        })
    }

    /// Places a lockout for the user, closing any episode already open.
    pub async fn lock_account(
        &self,
        request: LockRequest,
    ) -> Result<AccountLockout::Model, TrendTapError> {
        let db = self.db.lock().await;
        let txn = db.begin().await?;

        let lockout = self.apply_lock(&txn, request, Utc::now()).await?;

        txn.commit().await?;

        info!(
            user_id = %lockout.user_id,
            reason = ?lockout.reason,
            permanent = lockout.is_permanent,
            locked_until = ?lockout.locked_until,
            "Account locked"
        );

        Ok(lockout)
    }

    /// Closes all active lockout episodes for the user. Returns `false`
    /// when there was nothing to unlock.
    pub async fn unlock_account(
        &self,
        user_id: Uuid,
        reason: &str,
    ) -> Result<bool, TrendTapError> {
        let db = self.db.lock().await;
        let txn = db.begin().await?;

        let unlocked = AccountLockout::Entity::update_many()
            .set(AccountLockout::ActiveModel {
                is_active: Set(false),
                ..Default::default()
            })
            .filter(AccountLockout::Column::UserId.eq(user_id))
            .filter(AccountLockout::Column::IsActive.eq(true))
            .exec(&txn)
            .await?
            .rows_affected;

        if unlocked > 0 {
            // Delete the attempt rows so they don't count toward the next
            // lockout.
            FailedLoginAttempt::Entity::delete_many()
                .filter(FailedLoginAttempt::Column::UserId.eq(user_id))
                .exec(&txn)
                .await?;

            SecurityEventLog::append(
                &txn,
                NewSecurityEvent {
                    user_id: Some(user_id),
                    kind: SecurityEventKind::AccountUnlocked,
                    severity: Severity::Medium,
                    description: reason.to_owned(),
                    remote_ip: None,
                    user_agent: None,
                    metadata: None,
                },
            )
            .await?;
        }

        txn.commit().await?;

        if unlocked > 0 {
            info!(user_id = %user_id, episodes = unlocked, "Account unlocked");
        }

        Ok(unlocked > 0)
    }

    /// Self-service unlock: closes the non-permanent lockout carrying
    /// `token` and drops the user's attempt rows.
    pub async fn redeem_unlock_token(
        &self,
        token: &str,
    ) -> Result<AccountLockout::Model, TrendTapError> {
        let db = self.db.lock().await;
        let txn = db.begin().await?;

        let Some(lockout) = AccountLockout::Entity::find()
            .filter(AccountLockout::Column::UnlockToken.eq(token))
            .filter(AccountLockout::Column::IsActive.eq(true))
            .filter(AccountLockout::Column::IsPermanent.eq(false))
            .one(&txn)
            .await?
        else {
            return Err(TrendTapError::InvalidUnlockToken);
        };

        let mut model: AccountLockout::ActiveModel = lockout.into();
        model.is_active = Set(false);
        let lockout = model.update(&txn).await?;

        FailedLoginAttempt::Entity::delete_many()
            .filter(FailedLoginAttempt::Column::UserId.eq(lockout.user_id))
            .exec(&txn)
            .await?;

        SecurityEventLog::append(
            &txn,
            NewSecurityEvent {
                user_id: Some(lockout.user_id),
                kind: SecurityEventKind::AccountUnlocked,
                severity: Severity::Medium,
                description: "Unlock token redeemed".to_owned(),
                remote_ip: None,
                user_agent: None,
                metadata: None,
            },
        )
        .await?;

        txn.commit().await?;

        info!(user_id = %lockout.user_id, "Account unlocked via token");
        Ok(lockout)
    }

    /// True iff an active episode is locked right now. An elapsed timed
    /// lockout still sits `is_active` in storage but reports unlocked.
    pub async fn is_account_locked(&self, user_id: Uuid) -> Result<bool, TrendTapError> {
        Ok(self.active_lockout(user_id).await?.is_some())
    }

    /// The episode currently locking the account, if any.
    pub async fn active_lockout(
        &self,
        user_id: Uuid,
    ) -> Result<Option<AccountLockout::Model>, TrendTapError> {
        let db = self.db.lock().await;
        let now = Utc::now();
        let lockouts = AccountLockout::Entity::find()
            .filter(AccountLockout::Column::UserId.eq(user_id))
            .filter(AccountLockout::Column::IsActive.eq(true))
            .order_by_desc(AccountLockout::Column::LockedAt)
            .all(&*db)
            .await?;
        Ok(lockouts.into_iter().find(|l| l.is_locked_at(now)))
    }

    /// Every account locked right now, most recent first.
    pub async fn list_active_lockouts(&self) -> Result<Vec<AccountLockout::Model>, TrendTapError> {
        let db = self.db.lock().await;
        let now = Utc::now();
        let lockouts = AccountLockout::Entity::find()
            .filter(AccountLockout::Column::IsActive.eq(true))
            .order_by_desc(AccountLockout::Column::LockedAt)
            .all(&*db)
            .await?;
        Ok(lockouts
            .into_iter()
            .filter(|l| l.is_locked_at(now))
            .collect())
    }

    /// Stores a suspicious-activity report. A risk score at or above the
    /// configured threshold locks the account on the spot.
    pub async fn record_suspicious_activity(
        &self,
        report: SuspiciousActivityReport,
    ) -> Result<(SuspiciousActivity::Model, Option<AccountLockout::Model>), TrendTapError> {
        let db = self.db.lock().await;
        let txn = db.begin().await?;
        let now = Utc::now();

        let risk_score = report.risk_score.clamp(0, 100);
        let over_threshold = risk_score >= self.config.suspicious_risk_threshold as i16;

        let values = SuspiciousActivity::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(report.user_id),
            activity_type: Set(report.activity_type.clone()),
            description: Set(report.description.clone()),
            remote_ip: Set(report.remote_ip.clone()),
            risk_score: Set(risk_score),
            created_at: Set(now),
        };
        let activity = values.insert(&txn).await?;

        SecurityEventLog::append(
            &txn,
            NewSecurityEvent {
                user_id: report.user_id,
                kind: SecurityEventKind::SuspiciousActivity,
                severity: if over_threshold {
                    Severity::High
                } else {
                    Severity::Medium
                },
                description: format!("{}: {}", report.activity_type, report.description),
                remote_ip: report.remote_ip.clone(),
                user_agent: None,
                metadata: Some(serde_json::json!({ "risk_score": risk_score })),
            },
        )
        .await?;

        let mut lockout = None;
        if over_threshold {
            if let Some(user_id) = report.user_id {
                lockout = Some(
                    self.apply_lock(
                        &txn,
                        LockRequest {
                            user_id,
                            reason: LockoutReason::SuspiciousActivity,
                            description: format!(
                                "Suspicious activity ({}) with risk score {}",
                                report.activity_type, risk_score
                            ),
                            duration: Some(self.config.lockout_duration),
                            is_permanent: false,
                            locked_by: None,
                        },
                        now,
                    )
                    .await?,
                );
            }
        }

        txn.commit().await?;

        info!(
            activity_type = %report.activity_type,
            risk_score,
            locked = lockout.is_some(),
            "Recorded suspicious activity"
        );

        Ok((activity, lockout))
    }

    /// Registers a credential breach: appends a critical, unresolved
    /// `password_breach` event and places a permanent lockout. No
    /// threshold; a breached credential always locks.
    pub async fn record_password_breach(
        &self,
        user_id: Uuid,
        source: &str,
    ) -> Result<(SecurityEvent::Model, AccountLockout::Model), TrendTapError> {
        let db = self.db.lock().await;
        let txn = db.begin().await?;
        let now = Utc::now();

        let event = SecurityEventLog::append(
            &txn,
            NewSecurityEvent {
                user_id: Some(user_id),
                kind: SecurityEventKind::PasswordBreach,
                severity: Severity::Critical,
                description: format!("Password found in breach corpus: {source}"),
                remote_ip: None,
                user_agent: None,
                metadata: Some(serde_json::json!({ "source": source })),
            },
        )
        .await?;

        let lockout = self
            .apply_lock(
                &txn,
                LockRequest {
                    user_id,
                    reason: LockoutReason::PasswordBreach,
                    description: format!("Credentials exposed in breach: {source}"),
                    duration: None,
                    is_permanent: true,
                    locked_by: None,
                },
                now,
            )
            .await?;

        txn.commit().await?;

        info!(user_id = %user_id, source = %source, "Recorded password breach");
        Ok((event, lockout))
    }

    /// Clear-on-success: deletes the user's failed-attempt rows, returning
    /// how many were removed.
    pub async fn clear_failed_attempts(&self, user_id: Uuid) -> Result<u64, TrendTapError> {
        let db = self.db.lock().await;
        let removed = FailedLoginAttempt::Entity::delete_many()
            .filter(FailedLoginAttempt::Column::UserId.eq(user_id))
            .exec(&*db)
            .await?
            .rows_affected;
        debug!(user_id = %user_id, removed, "Cleared failed login attempts");
        Ok(removed)
    }

    /// Maintenance pass: closes elapsed timed lockouts and deletes attempt
    /// rows older than the retention window. Always explicitly invoked;
    /// there is no background sweep.
    pub async fn cleanup_expired(&self) -> Result<CleanupStats, TrendTapError> {
        let db = self.db.lock().await;
        let txn = db.begin().await?;
        let now = Utc::now();

        let expired_lockouts_closed = AccountLockout::Entity::update_many()
            .set(AccountLockout::ActiveModel {
                is_active: Set(false),
                ..Default::default()
            })
            .filter(AccountLockout::Column::IsActive.eq(true))
            .filter(AccountLockout::Column::IsPermanent.eq(false))
            .filter(AccountLockout::Column::LockedUntil.lte(now))
            .exec(&txn)
            .await?
            .rows_affected;

        let retention_cutoff = window_start(now, self.config.attempt_retention);
        let old_attempts_removed = FailedLoginAttempt::Entity::delete_many()
            .filter(FailedLoginAttempt::Column::CreatedAt.lt(retention_cutoff))
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        let stats = CleanupStats {
            expired_lockouts_closed,
            old_attempts_removed,
        };
        if stats.expired_lockouts_closed > 0 || stats.old_attempts_removed > 0 {
            info!(
                expired_lockouts = stats.expired_lockouts_closed,
                old_attempts = stats.old_attempts_removed,
                "Lockout ledger cleanup completed"
            );
        }
        Ok(stats)
    }

    /// Closes any open episode, inserts the new one and appends the
    /// `account_locked` event, keeping at most one active row per user.
    async fn apply_lock<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        request: LockRequest,
        now: DateTime<Utc>,
    ) -> Result<AccountLockout::Model, TrendTapError> {
        AccountLockout::Entity::update_many()
            .set(AccountLockout::ActiveModel {
                is_active: Set(false),
                ..Default::default()
            })
            .filter(AccountLockout::Column::UserId.eq(request.user_id))
            .filter(AccountLockout::Column::IsActive.eq(true))
            .exec(conn)
            .await?;

        let locked_until = if request.is_permanent {
            None
        } else {
            let duration = request.duration.unwrap_or(self.config.lockout_duration);
            Some(now + chrono::Duration::from_std(duration).map_err(TrendTapError::other)?)
        };

        let values = AccountLockout::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(request.user_id),
            reason: Set(request.reason.clone()),
            description: Set(request.description.clone()),
            locked_at: Set(now),
            locked_until: Set(locked_until),
            is_permanent: Set(request.is_permanent),
            unlock_token: Set(generate_unlock_token().expose_secret().to_owned()),
            locked_by: Set(request.locked_by),
            is_active: Set(true),
        };
        let lockout = values.insert(conn).await?;

        SecurityEventLog::append(
            conn,
            NewSecurityEvent {
                user_id: Some(request.user_id),
                kind: SecurityEventKind::AccountLocked,
                severity: Severity::High,
                description: request.description,
                remote_ip: None,
                user_agent: None,
                metadata: None,
            },
        )
        .await?;

        Ok(lockout)
    }
}

async fn currently_locked<C: sea_orm::ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<bool, TrendTapError> {
    let active = AccountLockout::Entity::find()
        .filter(AccountLockout::Column::UserId.eq(user_id))
        .filter(AccountLockout::Column::IsActive.eq(true))
        .all(conn)
        .await?;
    Ok(active.iter().any(|l| l.is_locked_at(now)))
}
