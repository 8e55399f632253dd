use sea_orm_migration::prelude::*;

use crate::database::entity::advice;
use crate::database::entity::country;
use crate::database::entity::country_advice::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240301_000004_create_country_advice_table"
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
                    .col(ColumnDef::new(Column::CountryId).big_integer().not_null())
                    .col(ColumnDef::new(Column::AdviceId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Column::CountryId)
                            .col(Column::AdviceId),
                    )
                    // Countries clean up their links before deletion
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_country_advice_country")
                            .from_tbl(Entity)
                            .from_col(Column::CountryId)
                            .to_tbl(country::Entity)
                            .to_col(country::Column::Id),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_country_advice_advice")
                            .from_tbl(Entity)
                            .from_col(Column::AdviceId)
                            .to_tbl(advice::Entity)
                            .to_col(advice::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }
}
