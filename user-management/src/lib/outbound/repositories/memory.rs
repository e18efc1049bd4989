use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountStatus;
use crate::domain::account::models::NewAccount;
use crate::domain::account::ports::AccountRepository;
use crate::domain::subscription_type::errors::SubscriptionTypeError;
use crate::domain::subscription_type::models::SubscriptionType;
use crate::domain::subscription_type::models::SubscriptionTypeDraft;
use crate::domain::subscription_type::models::SubscriptionTypeId;
use crate::domain::subscription_type::ports::SubscriptionTypeRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Cpf;
use crate::domain::user::models::Phone;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user_type::errors::UserTypeError;
use crate::domain::user_type::models::UserType;
use crate::domain::user_type::models::UserTypeDraft;
use crate::domain::user_type::models::UserTypeId;
use crate::domain::user_type::ports::UserTypeRepository;

/// Process-local store implementing every repository port.
///
/// All tables sit behind one lock, so each write checks uniqueness and
/// references atomically, the way the PostgreSQL constraints do.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    accounts: BTreeMap<i64, Account>,
    users: BTreeMap<i64, User>,
    user_types: BTreeMap<i64, UserType>,
    subscription_types: BTreeMap<i64, SubscriptionType>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn check_user(&self, draft: &UserDraft, owner: Option<UserId>) -> Result<(), UserError> {
        let others = self.users.values().filter(|u| Some(u.id) != owner);

        for other in others {
            if other.email == draft.email {
                return Err(UserError::EmailAlreadyExists(draft.email.to_string()));
            }
            if let Some(phone) = draft.phone.as_ref().filter(|p| other.phone.as_ref() == Some(*p)) {
                return Err(UserError::PhoneAlreadyExists(phone.to_string()));
            }
            if let Some(cpf) = draft.cpf.as_ref().filter(|c| other.cpf.as_ref() == Some(*c)) {
                return Err(UserError::CpfAlreadyExists(cpf.to_string()));
            }
        }

        if let Some(id) = draft.user_type_id {
            if !self.user_types.contains_key(&id.0) {
                return Err(UserError::UnknownReference("user type".to_string()));
            }
        }
        if let Some(id) = draft.subscription_type_id {
            if !self.subscription_types.contains_key(&id.0) {
                return Err(UserError::UnknownReference("subscription type".to_string()));
            }
        }

        Ok(())
    }

    fn check_subscription_type(
        &self,
        draft: &SubscriptionTypeDraft,
        owner: Option<SubscriptionTypeId>,
    ) -> Result<(), SubscriptionTypeError> {
        for other in self
            .subscription_types
            .values()
            .filter(|st| Some(st.id) != owner)
        {
            if other.name == draft.name {
                return Err(SubscriptionTypeError::NameAlreadyExists(
                    draft.name.to_string(),
                ));
            }
            if let Some(key) = draft
                .product_key
                .as_ref()
                .filter(|k| other.product_key.as_ref() == Some(*k))
            {
                return Err(SubscriptionTypeError::ProductKeyAlreadyExists(
                    key.to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the state flags of an account.
    ///
    /// # Errors
    /// * `NotFound` - No account with this username
    pub async fn set_account_status(
        &self,
        username: &str,
        status: AccountStatus,
    ) -> Result<(), AccountError> {
        let mut tables = self.tables.write().await;
        let account = tables
            .accounts
            .values_mut()
            .find(|a| a.username.as_str() == username)
            .ok_or_else(|| AccountError::NotFound(username.to_string()))?;

        account.status = status;
        account.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.tables.read().await.accounts.get(&id.0).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.email.as_str() == email)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.username.as_str() == identifier || a.email.as_str() == identifier)
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError> {
        Ok(AccountRepository::find_by_username(self, username)
            .await?
            .is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError> {
        Ok(AccountRepository::find_by_email(self, email).await?.is_some())
    }

    async fn save(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut tables = self.tables.write().await;

        if tables.accounts.values().any(|a| a.username == account.username) {
            return Err(AccountError::UsernameAlreadyExists(
                account.username.to_string(),
            ));
        }
        if tables.accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(account.email.to_string()));
        }

        let id = tables.next_id();
        let now = Utc::now();
        let stored = Account {
            id: AccountId(id),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            status: account.status,
            created_at: now,
            updated_at: now,
        };
        tables.accounts.insert(id, stored.clone());

        Ok(stored)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.tables.read().await.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<User>, UserError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.phone.as_ref() == Some(phone))
            .cloned())
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>, UserError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.cpf.as_ref() == Some(cpf))
            .cloned())
    }

    async fn create(&self, draft: UserDraft) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;
        tables.check_user(&draft, None)?;

        let id = UserId(tables.next_id());
        let user = User::from_draft(id, draft);
        tables.users.insert(id.0, user.clone());

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        let draft = UserDraft {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            cpf: user.cpf.clone(),
            period: user.period,
            user_type_id: user.user_type_id,
            subscription_type_id: user.subscription_type_id,
        };
        tables.check_user(&draft, Some(user.id))?;
        tables.users.insert(user.id.0, user.clone());

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.tables
            .write()
            .await
            .users
            .remove(&id.0)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl UserTypeRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<UserType>, UserTypeError> {
        Ok(self.tables.read().await.user_types.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserTypeId) -> Result<Option<UserType>, UserTypeError> {
        Ok(self.tables.read().await.user_types.get(&id.0).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<UserType>, UserTypeError> {
        let tables = self.tables.read().await;
        Ok(tables
            .user_types
            .values()
            .find(|t| t.name.as_str() == name)
            .cloned())
    }

    async fn create(&self, draft: UserTypeDraft) -> Result<UserType, UserTypeError> {
        let mut tables = self.tables.write().await;
        if tables.user_types.values().any(|t| t.name == draft.name) {
            return Err(UserTypeError::NameAlreadyExists(draft.name.to_string()));
        }

        let id = UserTypeId(tables.next_id());
        let user_type = draft.into_user_type(id);
        tables.user_types.insert(id.0, user_type.clone());

        Ok(user_type)
    }

    async fn update(&self, user_type: UserType) -> Result<UserType, UserTypeError> {
        let mut tables = self.tables.write().await;
        if !tables.user_types.contains_key(&user_type.id.0) {
            return Err(UserTypeError::NotFound(user_type.id.to_string()));
        }
        if tables
            .user_types
            .values()
            .any(|t| t.id != user_type.id && t.name == user_type.name)
        {
            return Err(UserTypeError::NameAlreadyExists(user_type.name.to_string()));
        }

        tables.user_types.insert(user_type.id.0, user_type.clone());
        Ok(user_type)
    }

    async fn delete(&self, id: &UserTypeId) -> Result<(), UserTypeError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.user_type_id == Some(*id)) {
            return Err(UserTypeError::InUse(id.to_string()));
        }

        tables
            .user_types
            .remove(&id.0)
            .map(|_| ())
            .ok_or(UserTypeError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl SubscriptionTypeRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<SubscriptionType>, SubscriptionTypeError> {
        Ok(self
            .tables
            .read()
            .await
            .subscription_types
            .values()
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &SubscriptionTypeId,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError> {
        Ok(self.tables.read().await.subscription_types.get(&id.0).cloned())
    }

    async fn find_by_product_key(
        &self,
        product_key: &str,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError> {
        let tables = self.tables.read().await;
        Ok(tables
            .subscription_types
            .values()
            .find(|st| st.product_key.as_ref().map(|k| k.as_str()) == Some(product_key))
            .cloned())
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<SubscriptionType>, SubscriptionTypeError> {
        let tables = self.tables.read().await;
        Ok(tables
            .subscription_types
            .values()
            .find(|st| st.name.as_str() == name)
            .cloned())
    }

    async fn create(
        &self,
        draft: SubscriptionTypeDraft,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        let mut tables = self.tables.write().await;
        tables.check_subscription_type(&draft, None)?;

        let id = SubscriptionTypeId(tables.next_id());
        let subscription_type = draft.into_subscription_type(id);
        tables
            .subscription_types
            .insert(id.0, subscription_type.clone());

        Ok(subscription_type)
    }

    async fn update(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<SubscriptionType, SubscriptionTypeError> {
        let mut tables = self.tables.write().await;
        let id = subscription_type.id;
        if !tables.subscription_types.contains_key(&id.0) {
            return Err(SubscriptionTypeError::NotFound(id.to_string()));
        }

        let draft = SubscriptionTypeDraft {
            name: subscription_type.name.clone(),
            plan: subscription_type.plan,
            product_key: subscription_type.product_key.clone(),
        };
        tables.check_subscription_type(&draft, Some(id))?;
        tables
            .subscription_types
            .insert(id.0, subscription_type.clone());

        Ok(subscription_type)
    }

    async fn delete(&self, id: &SubscriptionTypeId) -> Result<(), SubscriptionTypeError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.subscription_type_id == Some(*id))
        {
            return Err(SubscriptionTypeError::InUse(id.to_string()));
        }

        tables
            .subscription_types
            .remove(&id.0)
            .map(|_| ())
            .ok_or(SubscriptionTypeError::NotFound(id.to_string()))
    }
}
