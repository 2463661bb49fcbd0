//! Payment Entity

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::ids::{OrderId, PaymentId};
use crate::error::{CrmError, CrmResult};

/// Mutable fields of a payment, replaced wholesale on update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFields {
    pub order_id: OrderId,
    pub amount: i64,
    pub is_paid: bool,
}

impl PaymentFields {
    pub fn validate(self) -> CrmResult<Self> {
        if self.amount < 0 {
            return Err(CrmError::Validation("Amount cannot be negative".into()));
        }
        Ok(self)
    }
}

/// Money recorded against an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub user_id: UserId,
    pub order_id: OrderId,
    pub amount: i64,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(user_id: UserId, fields: PaymentFields) -> Self {
        let now = super::now();
        Self {
            payment_id: PaymentId::new(),
            user_id,
            order_id: fields.order_id,
            amount: fields.amount,
            is_paid: fields.is_paid,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the mutable fields
    pub fn apply(&mut self, fields: PaymentFields) {
        self.order_id = fields.order_id;
        self.amount = fields.amount;
        self.is_paid = fields.is_paid;
        self.updated_at = super::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_amount_is_rejected() {
        let fields = PaymentFields {
            order_id: OrderId::new(),
            amount: -5,
            is_paid: false,
        };
        assert!(matches!(fields.validate(), Err(CrmError::Validation(_))));
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        let fields = PaymentFields {
            order_id: OrderId::new(),
            amount: 0,
            is_paid: true,
        };
        assert!(fields.validate().is_ok());
    }
}
