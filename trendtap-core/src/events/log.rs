use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tokio::sync::Mutex;
use trendtap_common::TrendTapError;
use trendtap_db_entities::SecurityEvent::{self, SecurityEventKind, Severity};
use uuid::Uuid;

pub const DEFAULT_QUERY_LIMIT: u64 = 100;

/// A security occurrence about to be appended to the log.
#[derive(Clone, Debug)]
pub struct NewSecurityEvent {
    pub user_id: Option<Uuid>,
    pub kind: SecurityEventKind,
    pub severity: Severity,
    pub description: String,
    pub remote_ip: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Criteria for reading the log back. Unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    pub user_id: Option<Uuid>,
    pub kind: Option<SecurityEventKind>,
    pub severity: Option<Severity>,
    pub limit: Option<u64>,
}

/// Append-only audit log. Writers inside a ledger transaction use the
/// static [`append`](Self::append); everything else goes through the shared
/// connection.
pub struct SecurityEventLog {
    pub(crate) db: Arc<Mutex<DatabaseConnection>>,
}

impl SecurityEventLog {
    pub fn new(db: Arc<Mutex<DatabaseConnection>>) -> Self {
        Self { db }
    }

    /// Append one event on a caller-managed connection or transaction.
    pub async fn append<C: sea_orm::ConnectionTrait>(
        conn: &C,
        event: NewSecurityEvent,
    ) -> Result<SecurityEvent::Model, TrendTapError> {
        let values = SecurityEvent::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(event.user_id),
            kind: Set(event.kind),
            description: Set(event.description),
            remote_ip: Set(event.remote_ip),
            user_agent: Set(event.user_agent),
            severity: Set(event.severity),
            metadata: Set(event.metadata),
            resolved: Set(false),
            created_at: Set(Utc::now()),
        };
        Ok(values.insert(conn).await?)
    }

    /// Append one event on the shared connection.
    pub async fn log(
        &self,
        event: NewSecurityEvent,
    ) -> Result<SecurityEvent::Model, TrendTapError> {
        let db = self.db.lock().await;
        Self::append(&*db, event).await
    }

    /// Read events matching `filter`, newest first.
    pub async fn query(
        &self,
        filter: EventFilter,
    ) -> Result<Vec<SecurityEvent::Model>, TrendTapError> {
        let db = self.db.lock().await;
        let mut query = SecurityEvent::Entity::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(SecurityEvent::Column::UserId.eq(user_id));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(SecurityEvent::Column::Kind.eq(kind));
        }
        if let Some(severity) = filter.severity {
            query = query.filter(SecurityEvent::Column::Severity.eq(severity));
        }
        Ok(query
            .order_by_desc(SecurityEvent::Column::CreatedAt)
            .limit(filter.limit.unwrap_or(DEFAULT_QUERY_LIMIT))
            .all(&*db)
            .await?)
    }

    /// Mark a `password_breach` event as remediated.
    pub async fn resolve_breach(&self, id: Uuid) -> Result<SecurityEvent::Model, TrendTapError> {
        let db = self.db.lock().await;
        let Some(event) = SecurityEvent::Entity::find_by_id(id)
            .filter(SecurityEvent::Column::Kind.eq(SecurityEventKind::PasswordBreach))
            .one(&*db)
            .await?
        else {
            return Err(TrendTapError::BreachNotFound(id));
        };

        let mut model: SecurityEvent::ActiveModel = event.into();
        model.resolved = Set(true);
        Ok(model.update(&*db).await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, Database};
    use trendtap_db_migrations::migrate_database;

    use super::*;

    async fn event_log() -> SecurityEventLog {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        migrate_database(&db).await.unwrap();
        SecurityEventLog::new(Arc::new(Mutex::new(db)))
    }

    fn event(user_id: Option<Uuid>, kind: SecurityEventKind, severity: Severity) -> NewSecurityEvent {
        NewSecurityEvent {
            user_id,
            kind,
            severity,
            description: "test event".into(),
            remote_ip: Some("198.51.100.20".into()),
            user_agent: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_query_returns_newest_first() {
        let log = event_log().await;
        let user = Uuid::new_v4();

        log.log(event(Some(user), SecurityEventKind::FailedLogin, Severity::Low))
            .await
            .unwrap();
        log.log(event(Some(user), SecurityEventKind::AccountLocked, Severity::High))
            .await
            .unwrap();
        log.log(event(None, SecurityEventKind::LoginSuccess, Severity::Low))
            .await
            .unwrap();

        let all = log.query(EventFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].kind, SecurityEventKind::LoginSuccess);

        let for_user = log
            .query(EventFilter {
                user_id: Some(user),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(for_user.len(), 2);
        assert_eq!(for_user[0].kind, SecurityEventKind::AccountLocked);
    }

    #[tokio::test]
    async fn test_query_filters_by_kind_severity_and_limit() {
        let log = event_log().await;
        for _ in 0..3 {
            log.log(event(None, SecurityEventKind::FailedLogin, Severity::Low))
                .await
                .unwrap();
        }
        log.log(event(None, SecurityEventKind::PasswordBreach, Severity::Critical))
            .await
            .unwrap();

        let failed = log
            .query(EventFilter {
                kind: Some(SecurityEventKind::FailedLogin),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(failed.len(), 3);

        let critical = log
            .query(EventFilter {
                severity: Some(Severity::Critical),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].kind, SecurityEventKind::PasswordBreach);

        let limited = log
            .query(EventFilter {
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_breach_flips_the_flag() {
        let log = event_log().await;
        let stored = log
            .log(NewSecurityEvent {
                user_id: None,
                kind: SecurityEventKind::PasswordBreach,
                severity: Severity::Critical,
                description: "credentials in a public dump".into(),
                remote_ip: None,
                user_agent: None,
                metadata: Some(serde_json::json!({"source": "combo_list"})),
            })
            .await
            .unwrap();
        assert!(!stored.resolved);

        let resolved = log.resolve_breach(stored.id).await.unwrap();
        assert!(resolved.resolved);
    }

    #[tokio::test]
    async fn test_resolve_breach_rejects_other_events() {
        let log = event_log().await;

        assert!(matches!(
            log.resolve_breach(Uuid::new_v4()).await,
            Err(TrendTapError::BreachNotFound(_))
        ));

        let other = log
            .log(event(None, SecurityEventKind::AccountLocked, Severity::High))
            .await
            .unwrap();
        assert!(matches!(
            log.resolve_breach(other.id).await,
            Err(TrendTapError::BreachNotFound(_))
        ));
    }
}
