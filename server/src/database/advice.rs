//! Advice.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use super::entity::advice::{self, AdviceModel, Entity as Advice};
use crate::error::{ServerError, ServerResult};

/// Advice that has not been inserted yet.
#[derive(Debug, Clone)]
pub struct NewAdvice {
    pub topic: String,
    pub description: String,
    pub link: Option<String>,
}

#[async_trait]
pub trait AdviceDatabase: Send + Sync {
    /// Adds advice.
    ///
    /// Fails if advice on the same topic already exists.
    async fn add_advice(&self, advice: NewAdvice) -> ServerResult<AdviceModel>;

    /// Removes the advice with the same topic, if any.
    async fn remove_advice(&self, advice: &AdviceModel) -> ServerResult<()>;

    /// Retrieves advice by its exact topic.
    async fn get_advice_by_topic(&self, topic: &str) -> ServerResult<Option<AdviceModel>>;
}

#[async_trait]
impl AdviceDatabase for DatabaseConnection {
    async fn add_advice(&self, advice: NewAdvice) -> ServerResult<AdviceModel> {
        if self.get_advice_by_topic(&advice.topic).await?.is_some() {
            return Err(ServerError::AdviceAlreadyExists {
                topic: advice.topic,
            });
        }

        let model = advice::ActiveModel {
            topic: Set(advice.topic),
            description: Set(advice.description),
            link: Set(advice.link),
            ..Default::default()
        }
        .insert(self)
        .await
        .map_err(ServerError::database_error)?;

        tracing::info!("Created advice on {}", model.topic);

        Ok(model)
    }

    async fn remove_advice(&self, advice: &AdviceModel) -> ServerResult<()> {
        if let Some(existing) = self.get_advice_by_topic(&advice.topic).await? {
            Advice::delete_by_id(existing.id)
                .exec(self)
                .await
                .map_err(ServerError::database_error)?;

            tracing::info!("Deleted advice on {}", existing.topic);
        }

        Ok(())
    }

    async fn get_advice_by_topic(&self, topic: &str) -> ServerResult<Option<AdviceModel>> {
        Advice::find()
            .filter(advice::Column::Topic.eq(topic))
            .one(self)
            .await
            .map_err(ServerError::database_error)
    }
}
