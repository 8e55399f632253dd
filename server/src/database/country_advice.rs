//! Links between countries and advice.

use anyhow::anyhow;
use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;

use super::entity::advice::{AdviceModel, Entity as Advice};
use super::entity::country::CountryModel;
use super::entity::country_advice::{self, CountryAdviceModel, Entity as CountryAdvice};
use crate::error::{ServerError, ServerResult};

#[async_trait]
pub trait CountryAdviceDatabase: Send + Sync {
    /// Links advice to a country.
    ///
    /// Fails if the link already exists.
    async fn add_country_advice(
        &self,
        country: &CountryModel,
        advice: &AdviceModel,
    ) -> ServerResult<()>;

    /// Unlinks advice from a country, doing nothing if there is no link.
    async fn remove_country_advice(
        &self,
        country: &CountryModel,
        advice: &AdviceModel,
    ) -> ServerResult<()>;

    /// Retrieves all advice linked to a country.
    async fn get_advice(&self, country: &CountryModel) -> ServerResult<Vec<AdviceModel>>;
}

async fn find_link(
    database: &DatabaseConnection,
    country_id: i64,
    advice_id: i64,
) -> ServerResult<Option<CountryAdviceModel>> {
    CountryAdvice::find_by_id((country_id, advice_id))
        .one(database)
        .await
        .map_err(ServerError::database_error)
}

#[async_trait]
impl CountryAdviceDatabase for DatabaseConnection {
    async fn add_country_advice(
        &self,
        country: &CountryModel,
        advice: &AdviceModel,
    ) -> ServerResult<()> {
        if find_link(self, country.id, advice.id).await?.is_some() {
            return Err(ServerError::CountryAdviceAlreadyExists);
        }

        CountryAdvice::insert(country_advice::ActiveModel {
            country_id: Set(country.id),
            advice_id: Set(advice.id),
        })
        .exec_without_returning(self)
        .await
        .map_err(ServerError::database_error)?;

        tracing::info!("Linked advice on {} to {}", advice.topic, country.name);

        Ok(())
    }

    async fn remove_country_advice(
        &self,
        country: &CountryModel,
        advice: &AdviceModel,
    ) -> ServerResult<()> {
        if find_link(self, country.id, advice.id).await?.is_some() {
            CountryAdvice::delete_by_id((country.id, advice.id))
                .exec(self)
                .await
                .map_err(ServerError::database_error)?;

            tracing::info!("Unlinked advice on {} from {}", advice.topic, country.name);
        }

        Ok(())
    }

    async fn get_advice(&self, country: &CountryModel) -> ServerResult<Vec<AdviceModel>> {
        let advice_ids: Vec<i64> = CountryAdvice::find()
            .filter(country_advice::Column::CountryId.eq(country.id))
            .order_by_asc(country_advice::Column::AdviceId)
            .all(self)
            .await
            .map_err(ServerError::database_error)?
            .into_iter()
            .map(|link| link.advice_id)
            .collect();

        let mut advice = Vec::with_capacity(advice_ids.len());
        for advice_id in advice_ids {
            let model = Advice::find_by_id(advice_id)
                .one(self)
                .await
                .map_err(ServerError::database_error)?
                .ok_or_else(|| {
                    ServerError::DatabaseError(anyhow!(
                        "Country {} is linked to missing advice {}",
                        country.id,
                        advice_id
                    ))
                })?;

            advice.push(model);
        }

        Ok(advice)
    }
}
