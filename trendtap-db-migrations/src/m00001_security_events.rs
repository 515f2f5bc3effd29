use sea_orm::Schema;
use sea_orm_migration::prelude::*;

pub mod security_event {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use sea_orm::query::JsonValue;
    use uuid::Uuid;

    #[derive(Debug, PartialEq, Eq, Clone, EnumIter, DeriveActiveEnum)]
    #[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
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

    #[derive(Debug, PartialEq, Eq, Clone, EnumIter, DeriveActiveEnum)]
    #[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
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

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
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
        pub metadata: Option<JsonValue>,
        pub resolved: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m00001_security_events"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);

        manager
            .create_table(schema.create_table_from_entity(security_event::Entity))
            .await?;

        // "events for user, newest first" and the trailing-24h count
        manager
            .create_index(
                Index::create()
                    .table(security_event::Entity)
                    .name("idx_security_events_user_created")
                    .col(Alias::new("user_id"))
                    .col(Alias::new("created_at"))
                    .to_owned(),
            )
            .await?;

        // kind-filtered queries (breach listings, unresolved counts)
        manager
            .create_index(
                Index::create()
                    .table(security_event::Entity)
                    .name("idx_security_events_kind_created")
                    .col(Alias::new("kind"))
                    .col(Alias::new("created_at"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(security_event::Entity)
                    .name("idx_security_events_kind_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(security_event::Entity)
                    .name("idx_security_events_user_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(security_event::Entity).to_owned())
            .await?;

        Ok(())
    }
}
