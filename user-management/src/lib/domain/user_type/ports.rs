use async_trait::async_trait;

use crate::user_type::errors::UserTypeError;
use crate::user_type::models::UserType;
use crate::user_type::models::UserTypeDraft;
use crate::user_type::models::UserTypeId;

/// Port for user type operations.
#[async_trait]
pub trait UserTypeServicePort: Send + Sync + 'static {
    async fn list_user_types(&self) -> Result<Vec<UserType>, UserTypeError>;

    /// # Errors
    /// * `NotFound` - User type does not exist
    async fn get_user_type(&self, id: &UserTypeId) -> Result<UserType, UserTypeError>;

    /// # Errors
    /// * `NotFound` - No user type with this name
    async fn get_user_type_by_name(&self, name: &str) -> Result<UserType, UserTypeError>;

    /// # Errors
    /// * `NameAlreadyExists` - Name is taken
    async fn create_user_type(&self, draft: UserTypeDraft) -> Result<UserType, UserTypeError>;

    /// # Errors
    /// * `NotFound` - User type does not exist
    /// * `NameAlreadyExists` - Name is taken by another user type
    async fn update_user_type(
        &self,
        id: &UserTypeId,
        draft: UserTypeDraft,
    ) -> Result<UserType, UserTypeError>;

    /// # Errors
    /// * `NotFound` - User type does not exist
    /// * `InUse` - Users still reference it
    async fn delete_user_type(&self, id: &UserTypeId) -> Result<(), UserTypeError>;
}

/// Persistence operations for user types.
#[async_trait]
pub trait UserTypeRepository: Send + Sync + 'static {
    async fn list_all(&self) -> Result<Vec<UserType>, UserTypeError>;

    async fn find_by_id(&self, id: &UserTypeId) -> Result<Option<UserType>, UserTypeError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<UserType>, UserTypeError>;

    /// # Errors
    /// * `NameAlreadyExists` - Uniqueness violated
    async fn create(&self, draft: UserTypeDraft) -> Result<UserType, UserTypeError>;

    /// # Errors
    /// * `NotFound` - User type does not exist
    /// * `NameAlreadyExists` - Uniqueness violated
    async fn update(&self, user_type: UserType) -> Result<UserType, UserTypeError>;

    /// # Errors
    /// * `NotFound` - User type does not exist
    /// * `InUse` - Foreign key violated
    async fn delete(&self, id: &UserTypeId) -> Result<(), UserTypeError>;
}
