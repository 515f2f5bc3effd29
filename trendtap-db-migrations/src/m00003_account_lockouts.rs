use sea_orm::Schema;
use sea_orm_migration::prelude::*;

pub mod account_lockout {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Debug, PartialEq, Eq, Clone, EnumIter, DeriveActiveEnum)]
    #[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
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

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "account_lockouts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub reason: LockoutReason,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        pub locked_at: DateTime<Utc>,
        pub locked_until: Option<DateTime<Utc>>,
        pub is_permanent: bool,
        pub unlock_token: String,
        pub locked_by: Option<Uuid>,
        pub is_active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m00003_account_lockouts"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);

        manager
            .create_table(schema.create_table_from_entity(account_lockout::Entity))
            .await?;

        // "is this user locked" reads fetch active rows per user
        manager
            .create_index(
                Index::create()
                    .table(account_lockout::Entity)
                    .name("idx_account_lockouts_user_active")
                    .col(Alias::new("user_id"))
                    .col(Alias::new("is_active"))
                    .to_owned(),
            )
            .await?;

        // cleanup scans for expired timed lockouts
        manager
            .create_index(
                Index::create()
                    .table(account_lockout::Entity)
                    .name("idx_account_lockouts_locked_until")
                    .col(Alias::new("locked_until"))
                    .to_owned(),
            )
            .await?;

        // token redemption looks the row up by its unlock token
        manager
            .create_index(
                Index::create()
                    .table(account_lockout::Entity)
                    .name("idx_account_lockouts_unlock_token")
                    .col(Alias::new("unlock_token"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(account_lockout::Entity)
                    .name("idx_account_lockouts_unlock_token")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(account_lockout::Entity)
                    .name("idx_account_lockouts_locked_until")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(account_lockout::Entity)
                    .name("idx_account_lockouts_user_active")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(account_lockout::Entity).to_owned())
            .await?;

        Ok(())
    }
}
