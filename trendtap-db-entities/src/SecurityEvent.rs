use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::query::JsonValue;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Serialize, Clone, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum SecurityEventKind {
    #[sea_orm(string_value = "failed_login")]
    FailedLogin,
    #[sea_orm(string_value = "login_success")]
    LoginSuccess,
    #[sea_orm(string_value = "account_locked")]
    AccountLocked,
    #[sea_orm(string_value = "account_unlocked")]
    AccountUnlocked,
    #[sea_orm(string_value = "suspicious_activity")]
    SuspiciousActivity,
    #[sea_orm(string_value = "password_breach")]
    PasswordBreach,
    #[sea_orm(string_value = "password_changed")]
    PasswordChanged,
}

impl std::str::FromStr for SecurityEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "failed_login" => Ok(Self::FailedLogin),
            "login_success" => Ok(Self::LoginSuccess),
            "account_locked" => Ok(Self::AccountLocked),
            "account_unlocked" => Ok(Self::AccountUnlocked),
            "suspicious_activity" => Ok(Self::SuspiciousActivity),
            "password_breach" => Ok(Self::PasswordBreach),
            "password_changed" => Ok(Self::PasswordChanged),
            _ => Err(format!("unknown event kind: {s}")),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Clone, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "critical")]
    Critical,
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "security_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Option<Uuid>,

    pub kind: SecurityEventKind,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub remote_ip: Option<String>,

    pub user_agent: Option<String>,

    pub severity: Severity,

    /// Kind-specific payload; breach events keep their source here
    pub metadata: Option<JsonValue>,

    /// Remediation marker, consumed by kinds that track follow-up
    /// (password_breach)
    pub resolved: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
