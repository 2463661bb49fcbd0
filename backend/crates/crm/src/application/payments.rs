//! Payment Service
//!
//! Payments are not cached; every read goes to the repository.

use std::sync::Arc;

use auth::domain::value_object::user_id::UserId;

use crate::domain::entity::payment::{Payment, PaymentFields};
use crate::domain::repository::{OrderRepository, PaymentRepository};
use crate::domain::value_object::ids::{OrderId, PaymentId};
use crate::error::{CrmError, CrmResult};

pub struct PaymentService<R>
where
    R: OrderRepository + PaymentRepository,
{
    repo: Arc<R>,
}

impl<R> PaymentService<R>
where
    R: OrderRepository + PaymentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Missing or foreign parent order reads as `OrderNotFound`
    async fn ensure_order(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<()> {
        match self.repo.find_order(owner, order_id).await? {
            Some(_) => Ok(()),
            None => Err(CrmError::OrderNotFound),
        }
    }

    pub async fn create(&self, owner: &UserId, fields: PaymentFields) -> CrmResult<Payment> {
        let fields = fields.validate()?;
        self.ensure_order(owner, &fields.order_id).await?;

        let payment = Payment::new(*owner, fields);
        self.repo.create_payment(&payment).await?;

        tracing::info!(
            user_id = %owner,
            order_id = %payment.order_id,
            payment_id = %payment.payment_id,
            "Payment recorded"
        );

        Ok(payment)
    }

    pub async fn get(&self, owner: &UserId, payment_id: &PaymentId) -> CrmResult<Payment> {
        self.repo
            .find_payment(owner, payment_id)
            .await?
            .ok_or(CrmError::PaymentNotFound)
    }

    /// Every payment of one order, oldest first
    pub async fn list(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<Vec<Payment>> {
        self.repo.list_payments(owner, order_id).await
    }

    pub async fn update(
        &self,
        owner: &UserId,
        payment_id: &PaymentId,
        fields: PaymentFields,
    ) -> CrmResult<Payment> {
        let fields = fields.validate()?;
        let mut payment = self.get(owner, payment_id).await?;
        self.ensure_order(owner, &fields.order_id).await?;
        payment.apply(fields);

        if !self.repo.update_payment(&payment).await? {
            return Err(CrmError::PaymentNotFound);
        }

        tracing::info!(user_id = %owner, payment_id = %payment_id, "Payment updated");

        Ok(payment)
    }

    pub async fn delete(&self, owner: &UserId, payment_id: &PaymentId) -> CrmResult<()> {
        if !self.repo.delete_payment(owner, payment_id).await? {
            return Err(CrmError::PaymentNotFound);
        }

        tracing::info!(user_id = %owner, payment_id = %payment_id, "Payment deleted");

        Ok(())
    }
}
