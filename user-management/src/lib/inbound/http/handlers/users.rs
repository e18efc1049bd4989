use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::account::models::EmailAddress;
use crate::inbound::http::handlers::FieldErrors;
use crate::subscription_type::models::SubscriptionTypeId;
use crate::user::models::Cpf;
use crate::user::models::Name;
use crate::user::models::Phone;
use crate::user::models::SubscriptionPeriod;
use crate::user::models::User;
use crate::user::models::UserDraft;
use crate::user_type::models::UserTypeId;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

pub use create_user::create_user;
pub use delete_user::delete_user;
pub use get_user::get_user;
pub use get_user::get_user_by_cpf;
pub use get_user::get_user_by_email;
pub use get_user::get_user_by_phone;
pub use list_users::list_users;
pub use update_user::update_user;

/// HTTP request body shared by create and update (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRequest {
    name: String,
    email: String,
    phone: Option<String>,
    cpf: Option<String>,
    dt_subscription: Option<NaiveDate>,
    dt_expiration: Option<NaiveDate>,
    user_type_id: Option<i64>,
    subscription_type_id: Option<i64>,
}

impl UserRequest {
    pub(crate) fn try_into_draft(self) -> Result<UserDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = errors.check("name", Name::new(self.name));
        let email = errors.check("email", EmailAddress::new(self.email));
        let phone = errors.check(
            "phone",
            non_blank(self.phone).map(|p| Phone::new(&p)).transpose(),
        );
        let cpf = errors.check(
            "cpf",
            non_blank(self.cpf).map(|c| Cpf::new(&c)).transpose(),
        );
        let period = errors.check(
            "dtExpiration",
            SubscriptionPeriod::new(self.dt_subscription, self.dt_expiration),
        );

        match (name, email, phone, cpf, period) {
            (Some(name), Some(email), Some(phone), Some(cpf), Some(period)) => Ok(UserDraft {
                name,
                email,
                phone,
                cpf,
                period,
                user_type_id: self.user_type_id.map(UserTypeId),
                subscription_type_id: self.subscription_type_id.map(SubscriptionTypeId),
            }),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub dt_subscription: Option<NaiveDate>,
    pub dt_expiration: Option<NaiveDate>,
    pub user_type_id: Option<i64>,
    pub subscription_type_id: Option<i64>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_ref().map(|p| p.as_str().to_string()),
            cpf: user.cpf.as_ref().map(|c| c.as_str().to_string()),
            dt_subscription: user.period.subscription(),
            dt_expiration: user.period.expiration(),
            user_type_id: user.user_type_id.map(|id| id.0),
            subscription_type_id: user.subscription_type_id.map(|id| id.0),
        }
    }
}
