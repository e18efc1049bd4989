use async_trait::async_trait;

use crate::subscription_type::errors::SubscriptionTypeError;
use crate::subscription_type::models::SubscriptionType;
use crate::subscription_type::models::SubscriptionTypeDraft;
use crate::subscription_type::models::SubscriptionTypeId;

/// Port for subscription type operations.
#[async_trait]
pub trait SubscriptionTypeServicePort: Send + Sync + 'static {
    async fn list_subscription_types(&self) -> Result<Vec<SubscriptionType>, SubscriptionTypeError>;

    /// # Errors
    /// * `NotFound` - Subscription type does not exist
    async fn get_subscription_type(
        &self,
        id: &SubscriptionTypeId,
    ) -> Result<SubscriptionType, SubscriptionTypeError>;

    /// # Errors
    /// * `NotFound` - No subscription type with this product key
    async fn get_by_product_key(
        &self,
        product_key: &str,
    ) -> Result<SubscriptionType, SubscriptionTypeError>;

    /// # Errors
    /// * `NotFound` - No subscription type with this name
    async fn get_by_name(&self, name: &str) -> Result<SubscriptionType, SubscriptionTypeError>;

    /// # Errors
    /// * `NameAlreadyExists` / `ProductKeyAlreadyExists` - Unique field taken
    async fn create_subscription_type(
        &self,
        draft: SubscriptionTypeDraft,
    ) -> Result<SubscriptionType, SubscriptionTypeError>;

    /// # Errors
    /// * `NotFound` - Subscription type does not exist
    /// * `NameAlreadyExists` / `ProductKeyAlreadyExists` - Unique field taken by another plan
    async fn update_subscription_type(
        &self,
        id: &SubscriptionTypeId,
        draft: SubscriptionTypeDraft,
    ) -> Result<SubscriptionType, SubscriptionTypeError>;

    /// # Errors
    /// * `NotFound` - Subscription type does not exist
    /// * `InUse` - Users still reference it
    async fn delete_subscription_type(
        &self,
        id: &SubscriptionTypeId,
    ) -> Result<(), SubscriptionTypeError>;
}

/// Persistence operations for subscription types.
#[async_trait]
pub trait SubscriptionTypeRepository: Send + Sync + 'static {
    async fn list_all(&self) -> Result<Vec<SubscriptionType>, SubscriptionTypeError>;

    async fn find_by_id(
        &self,
        id: &SubscriptionTypeId,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError>;

    async fn find_by_product_key(
        &self,
        product_key: &str,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError>;

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError>;

    /// # Errors
    /// * `NameAlreadyExists` / `ProductKeyAlreadyExists` - Uniqueness violated
    async fn create(
        &self,
        draft: SubscriptionTypeDraft,
    ) -> Result<SubscriptionType, SubscriptionTypeError>;

    /// # Errors
    /// * `NotFound` - Subscription type does not exist
    /// * `NameAlreadyExists` / `ProductKeyAlreadyExists` - Uniqueness violated
    async fn update(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<SubscriptionType, SubscriptionTypeError>;

    /// # Errors
    /// * `NotFound` - Subscription type does not exist
    /// * `InUse` - Foreign key violated
    async fn delete(&self, id: &SubscriptionTypeId) -> Result<(), SubscriptionTypeError>;
}
