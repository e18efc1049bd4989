use serde::Serialize;

use crate::account::models::Account;
use crate::account::models::AuthSession;

pub mod health;
pub mod login;
pub mod me;
pub mod refresh;
pub mod register;
pub mod validate;

pub use health::health;
pub use login::login;
pub use me::me;
pub use refresh::refresh;
pub use register::register;
pub use validate::validate;

/// Token pair plus the account it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user_info: UserInfoData,
}

impl From<AuthSession> for AuthResponseData {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
            token_type: "Bearer",
            expires_in: session.tokens.expires_in,
            user_info: (&session.account).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfoData {
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<&Account> for UserInfoData {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.to_string(),
            email: account.email.to_string(),
            role: account.role.to_string(),
        }
    }
}
