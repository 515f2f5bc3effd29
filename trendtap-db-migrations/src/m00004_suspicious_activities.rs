use sea_orm::Schema;
use sea_orm_migration::prelude::*;

pub mod suspicious_activity {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "suspicious_activities")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Option<Uuid>,
        pub activity_type: String,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        pub remote_ip: Option<String>,
        pub risk_score: i16,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m00004_suspicious_activities"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);

        manager
            .create_table(schema.create_table_from_entity(suspicious_activity::Entity))
            .await?;

        // trailing-30d per-user count in the security summary
        manager
            .create_index(
                Index::create()
                    .table(suspicious_activity::Entity)
                    .name("idx_suspicious_activities_user_created")
                    .col(Alias::new("user_id"))
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
                    .table(suspicious_activity::Entity)
                    .name("idx_suspicious_activities_user_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(suspicious_activity::Entity).to_owned())
            .await?;

        Ok(())
    }
}
