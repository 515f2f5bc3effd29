use std::sync::Arc;

use anyhow::Result;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use trendtap_common::password::{
    evaluate_password, EvaluationContext, GuessCountEstimator, PasswordValidationResult,
    StrengthEstimator,
};
use trendtap_common::TrendTapConfig;

use crate::db::connect_to_db;
use crate::events::SecurityEventLog;
use crate::lockout::LockoutLedger;

/// Shared context every operation runs against. Built once at startup and
/// passed around; nothing in here is a global.
#[derive(Clone)]
pub struct Services {
    pub db: Arc<Mutex<DatabaseConnection>>,
    pub config: Arc<Mutex<TrendTapConfig>>,
    pub lockout: Arc<LockoutLedger>,
    pub events: Arc<SecurityEventLog>,
    pub estimator: Arc<dyn StrengthEstimator>,
}

impl Services {
    pub async fn new(config: TrendTapConfig) -> Result<Self> {
        let db = connect_to_db(&config).await?;
        let db = Arc::new(Mutex::new(db));

        let lockout = Arc::new(LockoutLedger::new(config.store.lockout.clone(), db.clone()));
        let events = Arc::new(SecurityEventLog::new(db.clone()));

        Ok(Self {
            db,
            config: Arc::new(Mutex::new(config)),
            lockout,
            events,
            estimator: Arc::new(GuessCountEstimator),
        })
    }

    /// Evaluate a candidate password under the configured requirements,
    /// scored by the built-in estimator.
    pub async fn validate_password(
        &self,
        password: &str,
        context: Option<&EvaluationContext>,
    ) -> PasswordValidationResult {
        let requirements = self.config.lock().await.store.password_requirements.clone();
        evaluate_password(password, &requirements, context, Some(&*self.estimator))
    }
}

#[cfg(test)]
mod tests {
    use trendtap_common::TrendTapConfigStore;

    use super::*;

    async fn services() -> Services {
        let config = TrendTapConfig {
            store: TrendTapConfigStore {
                database_url: "sqlite::memory:".to_owned().into(),
                ..Default::default()
            },
            paths_relative_to: ".".into(),
        };
        Services::new(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_validate_password_applies_config_and_context() {
        let services = services().await;

        let strong = services.validate_password("Tr3nd#Vortex!9Qz", None).await;
        assert!(strong.is_valid, "feedback: {:?}", strong.feedback);

        let context = EvaluationContext {
            email: Some("christopher@example.com".to_owned()),
            ..Default::default()
        };
        let derived = services
            .validate_password("Christopher#99x", Some(&context))
            .await;
        assert!(!derived.is_valid);
    }

    #[tokio::test]
    async fn test_services_share_one_database() {
        let services = services().await;
        let user_id = uuid::Uuid::new_v4();

        services
            .lockout
            .lock_account(crate::lockout::LockRequest {
                user_id,
                reason: trendtap_db_entities::AccountLockout::LockoutReason::AdminLock,
                description: "hold".to_owned(),
                duration: None,
                is_permanent: true,
                locked_by: None,
            })
            .await
            .unwrap();

        // the event log sees the lockout the ledger wrote
        let summary = services.events.account_security_summary(user_id).await.unwrap();
        assert!(summary.active_lockout.is_some());
        assert_eq!(summary.events_last_24h, 1);
    }
}
