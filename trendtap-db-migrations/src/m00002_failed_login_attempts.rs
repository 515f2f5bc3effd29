use sea_orm::Schema;
use sea_orm_migration::prelude::*;

pub mod failed_login_attempt {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "failed_login_attempts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Option<Uuid>,
        pub email: String,
        pub remote_ip: String,
        pub user_agent: Option<String>,
        pub reason: Option<String>,
        pub suspicious: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m00002_failed_login_attempts"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);

        manager
            .create_table(schema.create_table_from_entity(failed_login_attempt::Entity))
            .await?;

        // windowed per-user threshold count
        manager
            .create_index(
                Index::create()
                    .table(failed_login_attempt::Entity)
                    .name("idx_failed_login_attempts_user_created")
                    .col(Alias::new("user_id"))
                    .col(Alias::new("created_at"))
                    .to_owned(),
            )
            .await?;

        // windowed per-IP suspicious check
        manager
            .create_index(
                Index::create()
                    .table(failed_login_attempt::Entity)
                    .name("idx_failed_login_attempts_ip_created")
                    .col(Alias::new("remote_ip"))
                    .col(Alias::new("created_at"))
                    .to_owned(),
            )
            .await?;

        // clear-on-success deletes by submitted email
        manager
            .create_index(
                Index::create()
                    .table(failed_login_attempt::Entity)
                    .name("idx_failed_login_attempts_email_created")
                    .col(Alias::new("email"))
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
                    .table(failed_login_attempt::Entity)
                    .name("idx_failed_login_attempts_email_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(failed_login_attempt::Entity)
                    .name("idx_failed_login_attempts_ip_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(failed_login_attempt::Entity)
                    .name("idx_failed_login_attempts_user_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(failed_login_attempt::Entity).to_owned())
            .await?;

        Ok(())
    }
}
