use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::Cpf;
use crate::domain::user::models::Phone;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }

    /// Fail when another user than `owner` already holds a unique field of `draft`.
    async fn ensure_unique(&self, draft: &UserDraft, owner: Option<UserId>) -> Result<(), UserError> {
        let taken_by_other = |found: Option<User>| match (found, owner) {
            (Some(user), Some(owner)) => user.id != owner,
            (Some(_), None) => true,
            (None, _) => false,
        };

        if taken_by_other(self.repository.find_by_email(draft.email.as_str()).await?) {
            return Err(UserError::EmailAlreadyExists(draft.email.to_string()));
        }

        if let Some(phone) = &draft.phone {
            if taken_by_other(self.repository.find_by_phone(phone).await?) {
                return Err(UserError::PhoneAlreadyExists(phone.to_string()));
            }
        }

        if let Some(cpf) = &draft.cpf {
            if taken_by_other(self.repository.find_by_cpf(cpf).await?) {
                return Err(UserError::CpfAlreadyExists(cpf.to_string()));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        tracing::debug!("Listing users");
        self.repository.list_all().await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn get_user_by_phone(&self, phone: &str) -> Result<User, UserError> {
        let phone = Phone::new(phone)?;
        self.repository
            .find_by_phone(&phone)
            .await?
            .ok_or_else(|| UserError::NotFound(phone.to_string()))
    }

    async fn get_user_by_cpf(&self, cpf: &str) -> Result<User, UserError> {
        let cpf = Cpf::new(cpf)?;
        self.repository
            .find_by_cpf(&cpf)
            .await?
            .ok_or_else(|| UserError::NotFound(cpf.to_string()))
    }

    async fn create_user(&self, draft: UserDraft) -> Result<User, UserError> {
        self.ensure_unique(&draft, None).await?;

        let user = self.repository.create(draft).await?;
        tracing::info!(user_id = %user.id, name = %user.name, "User created");

        Ok(user)
    }

    async fn update_user(&self, id: &UserId, draft: UserDraft) -> Result<User, UserError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }

        self.ensure_unique(&draft, Some(*id)).await?;

        let user = self.repository.update(User::from_draft(*id, draft)).await?;
        tracing::info!(user_id = %user.id, "User updated");

        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
