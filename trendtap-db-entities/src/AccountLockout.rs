use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Serialize, Clone, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum LockoutReason {
    #[sea_orm(string_value = "failed_login")]
    FailedLogin,
    #[sea_orm(string_value = "suspicious_activity")]
    SuspiciousActivity,
    #[sea_orm(string_value = "admin_lock")]
    AdminLock,
    #[sea_orm(string_value = "password_breach")]
    PasswordBreach,
    #[sea_orm(string_value = "rate_limit")]
    RateLimit,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "account_lockouts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    pub reason: LockoutReason,

    /// Free-text explanation shown to admins
    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub locked_at: DateTime<Utc>,

    /// None on permanent lockouts
    pub locked_until: Option<DateTime<Utc>>,

    pub is_permanent: bool,

    /// Redeemable secret for the self-service unlock path
    #[serde(skip_serializing)]
    pub unlock_token: String,

    /// Admin who placed a manual lock
    pub locked_by: Option<Uuid>,

    /// Whether this episode has been closed by an unlock. Stays true for an
    /// expired timed lockout until the next write touches the row;
    /// `is_locked_at` is the authoritative "locked right now" predicate.
    pub is_active: bool,
}

impl Model {
    /// Lazy-expiry predicate: permanent lockouts never expire on their own,
    /// timed ones end the moment `locked_until` passes.
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && (self.is_permanent
                || self.locked_until.map(|until| now < until).unwrap_or(true))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn lockout(locked_until: Option<DateTime<Utc>>, is_permanent: bool, is_active: bool) -> Model {
        Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            reason: LockoutReason::AdminLock,
            description: "".into(),
            locked_at: Utc::now(),
            locked_until,
            is_permanent,
            unlock_token: "".into(),
            locked_by: None,
            is_active,
        }
    }

    #[test]
    fn timed_lockout_expires_lazily() {
        let now = Utc::now();
        let current = lockout(Some(now + Duration::minutes(5)), false, true);
        let expired = lockout(Some(now - Duration::minutes(5)), false, true);
        assert!(current.is_locked_at(now));
        assert!(!expired.is_locked_at(now));
        // storage state still says active; only the predicate flips
        assert!(expired.is_active);
    }

    #[test]
    fn permanent_lockout_never_expires() {
        let now = Utc::now();
        let permanent = lockout(None, true, true);
        assert!(permanent.is_locked_at(now));
        assert!(permanent.is_locked_at(now + Duration::days(365 * 10)));
    }

    #[test]
    fn deactivated_lockout_is_not_locked() {
        let now = Utc::now();
        let closed = lockout(None, true, false);
        assert!(!closed.is_locked_at(now));
    }

    #[test]
    fn boundary_instant_counts_as_expired() {
        let now = Utc::now();
        let boundary = lockout(Some(now), false, true);
        assert!(!boundary.is_locked_at(now));
    }
}
