use std::sync::Arc;
use uuid::Uuid;

use corvair_core::miles::miles_for;
use corvair_core::repository::UserRepository;
use corvair_core::{Result, SeatClass};

/// Mile balance mutations. Stateless beyond the user balance it writes;
/// award and deduction share the `miles_for` formula so a cancellation
/// reverses exactly what the booking credited.
#[derive(Clone)]
pub struct MileLedger {
    users: Arc<dyn UserRepository>,
}

impl MileLedger {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Award miles for a batch of purchased seats, given as
    /// (price, class) pairs. Returns the total awarded.
    pub async fn award(&self, user_id: Uuid, seats: &[(i64, SeatClass)]) -> Result<i64> {
        let total: i64 = seats
            .iter()
            .map(|&(price, class)| miles_for(price, class))
            .sum();

        if total > 0 {
            let balance = self.users.credit_miles(user_id, total).await?;
            tracing::info!(%user_id, awarded = total, balance, "miles awarded");
        }
        Ok(total)
    }

    /// Deduct the miles previously earned for one seat, clamping the
    /// balance at zero. Never fails on shortfall.
    pub async fn deduct(&self, user_id: Uuid, price: i64, class: SeatClass) -> Result<i64> {
        let amount = miles_for(price, class);
        if amount > 0 {
            let balance = self.users.deduct_miles_clamped(user_id, amount).await?;
            tracing::info!(%user_id, deducted = amount, balance, "miles deducted");
        }
        Ok(amount)
    }

    /// Credit an arbitrary amount back, used when refunding a
    /// mile-financed purchase.
    pub async fn credit(&self, user_id: Uuid, amount: i64) -> Result<i64> {
        self.users.credit_miles(user_id, amount).await
    }

    /// Check-and-debit for mile-financed purchases; fails with
    /// `InsufficientMiles` when the balance cannot cover `amount`.
    pub async fn try_debit(&self, user_id: Uuid, amount: i64) -> Result<i64> {
        self.users.try_debit_miles(user_id, amount).await
    }
}
