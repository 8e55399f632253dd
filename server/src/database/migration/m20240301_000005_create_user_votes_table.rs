use sea_orm_migration::prelude::*;

use crate::database::entity::country;
use crate::database::entity::user;
use crate::database::entity::user_vote::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240301_000005_create_user_votes_table"
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
                    .col(ColumnDef::new(Column::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Column::CountryId).big_integer().not_null())
                    .col(ColumnDef::new(Column::VoteId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Column::UserId)
                            .col(Column::CountryId),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_user_votes_user")
                            .from_tbl(Entity)
                            .from_col(Column::UserId)
                            .to_tbl(user::Entity)
                            .to_col(user::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Countries clean up their votes before deletion
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_user_votes_country")
                            .from_tbl(Entity)
                            .from_col(Column::CountryId)
                            .to_tbl(country::Entity)
                            .to_col(country::Column::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-user-votes-country")
                    .table(Entity)
                    .col(Column::CountryId)
                    .col(Column::VoteId)
                    .to_owned(),
            )
            .await
    }
}
