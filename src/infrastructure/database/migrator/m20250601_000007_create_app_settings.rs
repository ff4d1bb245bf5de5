//! Create app_settings table
//!
//! Holds a single row keyed by a fixed id. Readers fall back to defaults
//! when the row has not been written yet.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppSettings::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppSettings::Currency)
                            .string_len(10)
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(AppSettings::ContactEmail).string())
                    .col(ColumnDef::new(AppSettings::ContactPhone).string())
                    .col(
                        ColumnDef::new(AppSettings::MaintenanceMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AppSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppSettings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AppSettings {
    Table,
    Id,
    Currency,
    ContactEmail,
    ContactPhone,
    MaintenanceMode,
    UpdatedAt,
}
