use std::fmt;

use chrono::NaiveDate;

use crate::account::models::EmailAddress;
use crate::subscription_type::models::SubscriptionTypeId;
use crate::user::errors::CpfError;
use crate::user::errors::NameError;
use crate::user::errors::PhoneError;
use crate::user::errors::SubscriptionPeriodError;
use crate::user::errors::UserIdError;
use crate::user_type::models::UserTypeId;

/// User profile record.
///
/// Distinct from the credential `Account`: a user is managed data, not a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: Name,
    pub email: EmailAddress,
    pub phone: Option<Phone>,
    pub cpf: Option<Cpf>,
    pub period: SubscriptionPeriod,
    pub user_type_id: Option<UserTypeId>,
    pub subscription_type_id: Option<SubscriptionTypeId>,
}

impl User {
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            cpf: draft.cpf,
            period: draft.period,
            user_type_id: draft.user_type_id,
            subscription_type_id: draft.subscription_type_id,
        }
    }
}

/// Validated user fields for create and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: Name,
    pub email: EmailAddress,
    pub phone: Option<Phone>,
    pub cpf: Option<Cpf>,
    pub period: SubscriptionPeriod,
    pub user_type_id: Option<UserTypeId>,
    pub subscription_type_id: Option<SubscriptionTypeId>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            _ => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name, trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    const MAX_LENGTH: usize = 150;

    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length == 0 {
            Err(NameError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number normalised to an optional leading `+` followed by digits.
///
/// Spaces, hyphens, dots and parentheses are accepted as separators and dropped,
/// so `(11) 98765-4321` and `11987654321` are the same phone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    const MIN_DIGITS: usize = 8;
    const MAX_DIGITS: usize = 15;

    pub fn new(phone: &str) -> Result<Self, PhoneError> {
        let invalid = PhoneError::InvalidFormat {
            min: Self::MIN_DIGITS,
            max: Self::MAX_DIGITS,
        };

        let trimmed = phone.trim();
        let (prefix, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(invalid),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(invalid);
        }

        Ok(Self(format!("{}{}", prefix, digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Brazilian taxpayer id, stored as its 11 digits.
///
/// Accepts the punctuated `000.000.000-00` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    pub fn new(cpf: &str) -> Result<Self, CpfError> {
        let digits: String = cpf
            .trim()
            .chars()
            .filter(|c| *c != '.' && *c != '-')
            .collect();

        if digits.len() == 11 && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(digits))
        } else {
            Err(CpfError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Subscription and expiration dates; expiration never precedes subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionPeriod {
    subscription: Option<NaiveDate>,
    expiration: Option<NaiveDate>,
}

impl SubscriptionPeriod {
    pub fn new(
        subscription: Option<NaiveDate>,
        expiration: Option<NaiveDate>,
    ) -> Result<Self, SubscriptionPeriodError> {
        if let (Some(subscription), Some(expiration)) = (subscription, expiration) {
            if expiration < subscription {
                return Err(SubscriptionPeriodError::ExpiresBeforeStart {
                    subscription,
                    expiration,
                });
            }
        }

        Ok(Self {
            subscription,
            expiration,
        })
    }

    pub fn subscription(&self) -> Option<NaiveDate> {
        self.subscription
    }

    pub fn expiration(&self) -> Option<NaiveDate> {
        self.expiration
    }
}
