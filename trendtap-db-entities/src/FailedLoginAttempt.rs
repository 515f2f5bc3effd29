use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "failed_login_attempts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Account the attempt targeted, when it could be resolved
    pub user_id: Option<Uuid>,

    /// Email exactly as the client submitted it
    pub email: String,

    pub remote_ip: String,

    pub user_agent: Option<String>,

    /// Why authentication failed ("invalid_password", "unknown_user", ...)
    pub reason: Option<String>,

    /// Set when the source IP had already crossed the per-IP failure
    /// threshold before this attempt
    pub suspicious: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
