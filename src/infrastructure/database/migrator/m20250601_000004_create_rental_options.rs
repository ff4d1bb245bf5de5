//! Create rental_options table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RentalOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RentalOptions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RentalOptions::Name).string().not_null())
                    .col(ColumnDef::new(RentalOptions::Description).text())
                    .col(
                        ColumnDef::new(RentalOptions::PricePerDay)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RentalOptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RentalOptions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RentalOptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RentalOptions {
    Table,
    Id,
    Name,
    Description,
    PricePerDay,
    CreatedAt,
    UpdatedAt,
}
