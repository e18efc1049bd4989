use std::fmt;

use crate::user::models::Name;
use crate::user_type::errors::UserTypeIdError;

/// Category a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserType {
    pub id: UserTypeId,
    pub name: Name,
    pub description: Option<String>,
}

/// Fields of a user type, for create and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTypeDraft {
    pub name: Name,
    pub description: Option<String>,
}

impl UserTypeDraft {
    pub fn new(name: Name, description: Option<String>) -> Self {
        // Blank descriptions are stored as absent
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Self { name, description }
    }

    pub fn into_user_type(self, id: UserTypeId) -> UserType {
        UserType {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserTypeId(pub i64);

impl UserTypeId {
    pub fn from_string(s: &str) -> Result<Self, UserTypeIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserTypeId(id)),
            _ => Err(UserTypeIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
