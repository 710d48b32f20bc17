use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer account. Only the mile balance is mutated by this engine;
/// profile fields are owned by identity management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Loyalty mile balance. Invariant: never negative.
    pub mile: i64,
}

impl User {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            mile: 0,
        }
    }
}

/// A stored card, keyed by (user_id, card_num). The card branch of a
/// booking requires one on file; charging it is an external concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    pub user_id: Uuid,
    pub card_num: String,
    pub holder_name: String,
    /// MM/YY
    pub expiry: String,
}
