use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "suspicious_activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Option<Uuid>,

    /// Classifier label ("credential_stuffing", "impossible_travel", ...)
    pub activity_type: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub remote_ip: Option<String>,

    /// 0..=100; reaching the configured threshold locks the account
    pub risk_score: i16,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
