use std::sync::Arc;

use async_trait::async_trait;

use crate::user_type::errors::UserTypeError;
use crate::user_type::models::UserType;
use crate::user_type::models::UserTypeDraft;
use crate::user_type::models::UserTypeId;
use crate::user_type::ports::UserTypeRepository;
use crate::user_type::ports::UserTypeServicePort;

pub struct UserTypeService<R>
where
    R: UserTypeRepository,
{
    repository: Arc<R>,
}

impl<R> UserTypeService<R>
where
    R: UserTypeRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn existing(&self, id: &UserTypeId) -> Result<UserType, UserTypeError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserTypeError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<R> UserTypeServicePort for UserTypeService<R>
where
    R: UserTypeRepository,
{
    async fn list_user_types(&self) -> Result<Vec<UserType>, UserTypeError> {
        self.repository.list_all().await
    }

    async fn get_user_type(&self, id: &UserTypeId) -> Result<UserType, UserTypeError> {
        self.existing(id).await
    }

    async fn get_user_type_by_name(&self, name: &str) -> Result<UserType, UserTypeError> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| UserTypeError::NotFound(name.to_string()))
    }

    async fn create_user_type(&self, draft: UserTypeDraft) -> Result<UserType, UserTypeError> {
        if self
            .repository
            .find_by_name(draft.name.as_str())
            .await?
            .is_some()
        {
            return Err(UserTypeError::NameAlreadyExists(draft.name.to_string()));
        }

        let user_type = self.repository.create(draft).await?;
        tracing::info!(user_type_id = %user_type.id, name = %user_type.name, "User type created");

        Ok(user_type)
    }

    async fn update_user_type(
        &self,
        id: &UserTypeId,
        draft: UserTypeDraft,
    ) -> Result<UserType, UserTypeError> {
        self.existing(id).await?;

        if let Some(other) = self.repository.find_by_name(draft.name.as_str()).await? {
            if other.id != *id {
                return Err(UserTypeError::NameAlreadyExists(draft.name.to_string()));
            }
        }

        let user_type = self.repository.update(draft.into_user_type(*id)).await?;
        tracing::info!(user_type_id = %id, "User type updated");

        Ok(user_type)
    }

    async fn delete_user_type(&self, id: &UserTypeId) -> Result<(), UserTypeError> {
        self.existing(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(user_type_id = %id, "User type deleted");
        Ok(())
    }
}
