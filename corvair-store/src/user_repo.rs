use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use corvair_core::repository::{CreditCardRepository, UserRepository};
use corvair_core::{CreditCard, Error, Result, User};

/// User accounts. Mile mutations run under the write lock, so a
/// check-and-debit cannot interleave with another balance write and the
/// balance can never observe a negative value.
pub struct MemoryUserRepository {
    inner: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get(&self, id: Uuid) -> Result<User> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("user", id))
    }

    async fn insert(&self, user: User) -> Result<()> {
        self.inner.write().await.insert(user.id, user);
        Ok(())
    }

    async fn credit_miles(&self, user_id: Uuid, amount: i64) -> Result<i64> {
        let mut map = self.inner.write().await;
        let user = map
            .get_mut(&user_id)
            .ok_or_else(|| Error::not_found("user", user_id))?;
        user.mile += amount;
        Ok(user.mile)
    }

    async fn deduct_miles_clamped(&self, user_id: Uuid, amount: i64) -> Result<i64> {
        let mut map = self.inner.write().await;
        let user = map
            .get_mut(&user_id)
            .ok_or_else(|| Error::not_found("user", user_id))?;
        user.mile = (user.mile - amount).max(0);
        Ok(user.mile)
    }

    async fn try_debit_miles(&self, user_id: Uuid, amount: i64) -> Result<i64> {
        let mut map = self.inner.write().await;
        let user = map
            .get_mut(&user_id)
            .ok_or_else(|| Error::not_found("user", user_id))?;
        if user.mile < amount {
            return Err(Error::InsufficientMiles {
                required: amount,
                available: user.mile,
            });
        }
        user.mile -= amount;
        Ok(user.mile)
    }
}

/// Stored cards keyed by (user_id, card_num).
pub struct MemoryCreditCardRepository {
    inner: RwLock<HashMap<(Uuid, String), CreditCard>>,
}

impl MemoryCreditCardRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCreditCardRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CreditCardRepository for MemoryCreditCardRepository {
    async fn find_for_user(&self, user_id: Uuid) -> Result<Option<CreditCard>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, card: CreditCard) -> Result<()> {
        self.inner
            .write()
            .await
            .insert((card.user_id, card.card_num.clone()), card);
        Ok(())
    }
}
