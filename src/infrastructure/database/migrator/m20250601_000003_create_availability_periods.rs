//! Create availability_periods table

use sea_orm_migration::prelude::*;

use super::m20250601_000002_create_vehicles::Vehicles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AvailabilityPeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailabilityPeriods::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPeriods::VehicleId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPeriods::StartDateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPeriods::EndDateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_periods_vehicle")
                            .from(AvailabilityPeriods::Table, AvailabilityPeriods::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_availability_periods_vehicle_id")
                    .table(AvailabilityPeriods::Table)
                    .col(AvailabilityPeriods::VehicleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvailabilityPeriods::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AvailabilityPeriods {
    Table,
    Id,
    VehicleId,
    StartDateTime,
    EndDateTime,
}
