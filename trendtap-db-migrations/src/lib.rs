use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;
use sea_orm_migration::MigrationTrait;

mod m00001_security_events;
mod m00002_failed_login_attempts;
mod m00003_account_lockouts;
mod m00004_suspicious_activities;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m00001_security_events::Migration),
            Box::new(m00002_failed_login_attempts::Migration),
            Box::new(m00003_account_lockouts::Migration),
            Box::new(m00004_suspicious_activities::Migration),
        ]
    }
}

pub async fn migrate_database(connection: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(connection, None).await
}
