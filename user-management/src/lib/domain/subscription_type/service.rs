use std::sync::Arc;

use async_trait::async_trait;

use crate::subscription_type::errors::SubscriptionTypeError;
use crate::subscription_type::models::SubscriptionType;
use crate::subscription_type::models::SubscriptionTypeDraft;
use crate::subscription_type::models::SubscriptionTypeId;
use crate::subscription_type::ports::SubscriptionTypeRepository;
use crate::subscription_type::ports::SubscriptionTypeServicePort;

/// Domain service implementation for subscription plans.
pub struct SubscriptionTypeService<R>
where
    R: SubscriptionTypeRepository,
{
    repository: Arc<R>,
}

impl<R> SubscriptionTypeService<R>
where
    R: SubscriptionTypeRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn existing(
        &self,
        id: &SubscriptionTypeId,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SubscriptionTypeError::NotFound(id.to_string()))
    }

    async fn ensure_unique(
        &self,
        draft: &SubscriptionTypeDraft,
        owner: Option<SubscriptionTypeId>,
    ) -> Result<(), SubscriptionTypeError> {
        let taken_by_other =
            |found: Option<SubscriptionType>| found.is_some_and(|st| Some(st.id) != owner);

        if taken_by_other(self.repository.find_by_name(draft.name.as_str()).await?) {
            return Err(SubscriptionTypeError::NameAlreadyExists(
                draft.name.to_string(),
            ));
        }

        if let Some(key) = &draft.product_key {
            if taken_by_other(self.repository.find_by_product_key(key.as_str()).await?) {
                return Err(SubscriptionTypeError::ProductKeyAlreadyExists(
                    key.to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<R> SubscriptionTypeServicePort for SubscriptionTypeService<R>
where
    R: SubscriptionTypeRepository,
{
    async fn list_subscription_types(&self) -> Result<Vec<SubscriptionType>, SubscriptionTypeError> {
        self.repository.list_all().await
    }

    async fn get_subscription_type(
        &self,
        id: &SubscriptionTypeId,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        self.existing(id).await
    }

    async fn get_by_product_key(
        &self,
        product_key: &str,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        self.repository
            .find_by_product_key(product_key)
            .await?
            .ok_or_else(|| SubscriptionTypeError::NotFound(product_key.to_string()))
    }

    async fn get_by_name(&self, name: &str) -> Result<SubscriptionType, SubscriptionTypeError> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| SubscriptionTypeError::NotFound(name.to_string()))
    }

    async fn create_subscription_type(
        &self,
        draft: SubscriptionTypeDraft,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        self.ensure_unique(&draft, None).await?;

        let subscription_type = self.repository.create(draft).await?;
        tracing::info!(
            subscription_type_id = %subscription_type.id,
            name = %subscription_type.name,
            "Subscription type created"
        );

        Ok(subscription_type)
    }

    async fn update_subscription_type(
        &self,
        id: &SubscriptionTypeId,
        draft: SubscriptionTypeDraft,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        self.existing(id).await?;
        self.ensure_unique(&draft, Some(*id)).await?;

        let subscription_type = self
            .repository
            .update(draft.into_subscription_type(*id))
            .await?;
        tracing::info!(subscription_type_id = %id, "Subscription type updated");

        Ok(subscription_type)
    }

    async fn delete_subscription_type(
        &self,
        id: &SubscriptionTypeId,
    ) -> Result<(), SubscriptionTypeError> {
        self.existing(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(subscription_type_id = %id, "Subscription type deleted");
        Ok(())
    }
}
