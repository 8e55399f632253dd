//! Countries.

use std::collections::HashSet;

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;

use super::country_advice::CountryAdviceDatabase;
use super::entity::country::{self, CountryModel, Entity as Country};
use super::votes::VoteDatabase;
use crate::error::{ServerError, ServerResult};
use advisory::risk::RiskIndices;

/// A country that has not been inserted yet.
#[derive(Debug, Clone, Default)]
pub struct NewCountry {
    pub name: String,
    pub description: String,
    pub travel_advice: String,
    pub indices: RiskIndices,
}

#[async_trait]
pub trait CountryDatabase: Send + Sync {
    /// Adds a country.
    ///
    /// Names are not checked for duplicates.
    async fn add_country(&self, country: NewCountry) -> ServerResult<CountryModel>;

    /// Writes all fields of an existing country.
    async fn update_country(&self, country: &CountryModel) -> ServerResult<CountryModel>;

    /// Removes a country along with its votes and advice links.
    ///
    /// Does nothing if the country does not exist. Each step is
    /// committed separately.
    async fn remove_country(&self, country: &CountryModel) -> ServerResult<()>;

    /// Retrieves the first country with a name.
    async fn get_country_by_name(&self, name: &str) -> ServerResult<Option<CountryModel>>;

    /// Retrieves a country by ID.
    async fn get_country_by_id(&self, id: i64) -> ServerResult<Option<CountryModel>>;

    /// Retrieves all countries.
    async fn get_all_countries(&self) -> ServerResult<HashSet<CountryModel>>;

    /// Retrieves the names of all countries.
    async fn all_country_names(&self) -> ServerResult<Vec<String>>;
}

#[async_trait]
impl CountryDatabase for DatabaseConnection {
    async fn add_country(&self, country: NewCountry) -> ServerResult<CountryModel> {
        let model = country::ActiveModel {
            name: Set(country.name),
            description: Set(country.description),
            travel_advice: Set(country.travel_advice),
            crime_index: Set(country.indices.crime_index),
            disaster_risk: Set(country.indices.disaster_risk),
            corruption_index: Set(country.indices.corruption_index),
            health: Set(country.indices.health),
            ..Default::default()
        }
        .insert(self)
        .await
        .map_err(ServerError::database_error)?;

        tracing::info!("Created country {} (#{})", model.name, model.id);

        Ok(model)
    }

    async fn update_country(&self, country: &CountryModel) -> ServerResult<CountryModel> {
        let model = Country::update(country::ActiveModel {
            id: Set(country.id),
            name: Set(country.name.to_owned()),
            description: Set(country.description.to_owned()),
            travel_advice: Set(country.travel_advice.to_owned()),
            crime_index: Set(country.crime_index),
            disaster_risk: Set(country.disaster_risk),
            corruption_index: Set(country.corruption_index),
            health: Set(country.health),
        })
        .exec(self)
        .await
        .map_err(ServerError::database_error)?;

        tracing::info!("Updated country {} (#{})", model.name, model.id);

        Ok(model)
    }

    async fn remove_country(&self, country: &CountryModel) -> ServerResult<()> {
        if self.get_country_by_id(country.id).await?.is_none() {
            return Ok(());
        }

        for vote in self.get_all_votes(country).await? {
            self.remove_vote(&vote).await?;
        }

        for advice in self.get_advice(country).await? {
            self.remove_country_advice(country, &advice).await?;
        }

        Country::delete_by_id(country.id)
            .exec(self)
            .await
            .map_err(ServerError::database_error)?;

        tracing::info!("Deleted country {} (#{})", country.name, country.id);

        Ok(())
    }

    async fn get_country_by_name(&self, name: &str) -> ServerResult<Option<CountryModel>> {
        Country::find()
            .filter(country::Column::Name.eq(name))
            .order_by_asc(country::Column::Id)
            .one(self)
            .await
            .map_err(ServerError::database_error)
    }

    async fn get_country_by_id(&self, id: i64) -> ServerResult<Option<CountryModel>> {
        Country::find_by_id(id)
            .one(self)
            .await
            .map_err(ServerError::database_error)
    }

    async fn get_all_countries(&self) -> ServerResult<HashSet<CountryModel>> {
        let countries = Country::find()
            .all(self)
            .await
            .map_err(ServerError::database_error)?;

        Ok(countries.into_iter().collect())
    }

    async fn all_country_names(&self) -> ServerResult<Vec<String>> {
        let countries = Country::find()
            .order_by_asc(country::Column::Id)
            .all(self)
            .await
            .map_err(ServerError::database_error)?;

        Ok(countries.into_iter().map(|country| country.name).collect())
    }
}
