use sea_orm_migration::prelude::*;

use crate::database::entity::country::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240301_000002_create_countries_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Column::Name).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Column::Description)
                            .string_len(2048)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Column::TravelAdvice)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Column::CrimeIndex)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Column::DisasterRisk)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Column::CorruptionIndex)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Column::Health)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-countries-name")
                    .table(Entity)
                    .col(Column::Name)
                    .to_owned(),
            )
            .await
    }
}
