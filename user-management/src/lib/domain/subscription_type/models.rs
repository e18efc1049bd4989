use std::fmt;

use crate::subscription_type::errors::PlanError;
use crate::subscription_type::errors::SubscriptionTypeIdError;
use crate::user::models::Name;

/// Subscription plan a user can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionType {
    pub id: SubscriptionTypeId,
    pub name: Name,
    pub plan: Plan,
    pub product_key: Option<ProductKey>,
}

/// Fields of a subscription type, for create and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTypeDraft {
    pub name: Name,
    pub plan: Plan,
    pub product_key: Option<ProductKey>,
}

impl SubscriptionTypeDraft {
    pub fn into_subscription_type(self, id: SubscriptionTypeId) -> SubscriptionType {
        SubscriptionType {
            id,
            name: self.name,
            plan: self.plan,
            product_key: self.product_key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionTypeId(pub i64);

impl SubscriptionTypeId {
    pub fn from_string(s: &str) -> Result<Self, SubscriptionTypeIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(SubscriptionTypeId(id)),
            _ => Err(SubscriptionTypeIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for SubscriptionTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access length and price of a plan.
///
/// Price is kept in integer minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plan {
    access_months: Option<i32>,
    price_cents: Option<i64>,
}

impl Plan {
    pub fn new(access_months: Option<i32>, price_cents: Option<i64>) -> Result<Self, PlanError> {
        if let Some(months) = access_months.filter(|m| *m <= 0) {
            return Err(PlanError::NonPositiveAccessMonths(months));
        }
        if let Some(price) = price_cents.filter(|p| *p < 0) {
            return Err(PlanError::NegativePrice(price));
        }

        Ok(Self {
            access_months,
            price_cents,
        })
    }

    pub fn access_months(&self) -> Option<i32> {
        self.access_months
    }

    pub fn price_cents(&self) -> Option<i64> {
        self.price_cents
    }
}

/// External catalogue key of a plan, trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductKey(String);

impl ProductKey {
    pub fn new(key: &str) -> Result<Self, PlanError> {
        let key = key.trim();
        if key.is_empty() {
            Err(PlanError::BlankProductKey)
        } else {
            Ok(Self(key.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_terms() {
        let plan = Plan::new(Some(12), Some(9_990)).unwrap();
        assert_eq!(plan.access_months(), Some(12));
        assert_eq!(plan.price_cents(), Some(9_990));

        assert!(Plan::new(None, None).is_ok());
        assert_eq!(
            Plan::new(Some(0), None),
            Err(PlanError::NonPositiveAccessMonths(0))
        );
        assert_eq!(Plan::new(None, Some(-1)), Err(PlanError::NegativePrice(-1)));
    }

    #[test]
    fn test_product_key_trimmed() {
        assert_eq!(ProductKey::new(" PRO-12 ").unwrap().as_str(), "PRO-12");
        assert_eq!(ProductKey::new("  "), Err(PlanError::BlankProductKey));
    }
}
