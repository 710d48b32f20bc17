use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Mile,
    Cash,
}

impl PaymentMethod {
    /// Card and mile purchases earn loyalty miles at booking time; cash
    /// earns nothing until settlement.
    pub fn awards_miles(&self) -> bool {
        matches!(self, PaymentMethod::Card | PaymentMethod::Mile)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "mile" => Ok(PaymentMethod::Mile),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(Error::Validation(format!("unknown payment method: {other}"))),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Mile => "MILE",
            PaymentMethod::Cash => "CASH",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Failed,
}

/// A payment record. Append-only: refunds are new rows with a negative
/// amount, never mutations of the original purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub method: PaymentMethod,
    /// Signed amount in whole currency units; negative means refund.
    pub total_amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        user_id: Uuid,
        method: PaymentMethod,
        total_amount: i64,
        currency: impl Into<String>,
        status: PaymentStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            method,
            total_amount,
            currency: currency.into(),
            status,
            paid_at: matches!(status, PaymentStatus::Paid | PaymentStatus::Refunded)
                .then_some(now),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_methods() {
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("MILE".parse::<PaymentMethod>().unwrap(), PaymentMethod::Mile);
        assert!("wire".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn pending_payment_has_no_paid_at() {
        let p = Payment::new(
            Uuid::new_v4(),
            PaymentMethod::Cash,
            500,
            "TRY",
            PaymentStatus::Pending,
        );
        assert!(p.paid_at.is_none());
    }
}
