use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use corvair_core::repository::PaymentRepository;
use corvair_core::{Error, Payment, Result};

pub struct MemoryPaymentRepository {
    inner: RwLock<HashMap<Uuid, Payment>>,
}

impl MemoryPaymentRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for MemoryPaymentRepository {
    async fn get(&self, id: Uuid) -> Result<Payment> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("payment", id))
    }

    async fn insert(&self, payment: Payment) -> Result<()> {
        self.inner.write().await.insert(payment.id, payment);
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .inner
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.created_at);
        Ok(payments)
    }
}
