use sea_orm_migration::prelude::*;

use crate::database::entity::advice::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240301_000003_create_advice_table"
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
                    .col(ColumnDef::new(Column::Topic).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Column::Description)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Column::Link).string_len(256).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-advice-topic")
                    .table(Entity)
                    .col(Column::Topic)
                    .to_owned(),
            )
            .await
    }
}
