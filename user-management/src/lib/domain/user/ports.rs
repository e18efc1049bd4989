use async_trait::async_trait;

use crate::user::errors::UserError;
use crate::user::models::Cpf;
use crate::user::models::Phone;
use crate::user::models::User;
use crate::user::models::UserDraft;
use crate::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve every user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by email.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Retrieve user by phone, in any accepted notation.
    ///
    /// # Errors
    /// * `InvalidPhone` - Input is not a phone number
    /// * `NotFound` - No user with this phone
    async fn get_user_by_phone(&self, phone: &str) -> Result<User, UserError>;

    /// Retrieve user by CPF, punctuated or not.
    ///
    /// # Errors
    /// * `InvalidCpf` - Input is not a CPF
    /// * `NotFound` - No user with this CPF
    async fn get_user_by_cpf(&self, cpf: &str) -> Result<User, UserError>;

    /// Create new user.
    ///
    /// # Arguments
    /// * `draft` - Validated user fields
    ///
    /// # Returns
    /// Created user with its assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` / `PhoneAlreadyExists` / `CpfAlreadyExists`
    /// * `UnknownReference` - Referenced user type or subscription type missing
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, draft: UserDraft) -> Result<User, UserError>;

    /// Replace every field of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` / `PhoneAlreadyExists` / `CpfAlreadyExists` - Value owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, draft: UserDraft) -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user profiles.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve all users ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<User>, UserError>;

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>, UserError>;

    /// Persist new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` / `PhoneAlreadyExists` / `CpfAlreadyExists` - Uniqueness violated
    /// * `UnknownReference` - Foreign key violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, draft: UserDraft) -> Result<User, UserError>;

    /// Overwrite an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` / `PhoneAlreadyExists` / `CpfAlreadyExists` - Uniqueness violated
    /// * `UnknownReference` - Foreign key violated
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
