use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use corvair_core::repository::TicketRepository;
use corvair_core::{Error, Result, Ticket, TicketStatus};

pub struct MemoryTicketRepository {
    inner: RwLock<HashMap<Uuid, Ticket>>,
}

impl MemoryTicketRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryTicketRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketRepository for MemoryTicketRepository {
    async fn get(&self, id: Uuid) -> Result<Ticket> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("ticket", id))
    }

    async fn insert(&self, ticket: Ticket) -> Result<()> {
        self.inner.write().await.insert(ticket.id, ticket);
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: TicketStatus) -> Result<()> {
        let mut map = self.inner.write().await;
        let ticket = map.get_mut(&id).ok_or_else(|| Error::not_found("ticket", id))?;
        ticket.status = status;
        Ok(())
    }

    async fn list_by_flight(&self, flight_id: Uuid) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .inner
            .read()
            .await
            .values()
            .filter(|t| t.flight_id == flight_id)
            .cloned()
            .collect();
        tickets.sort_by_key(|t| t.issue_time);
        Ok(tickets)
    }

    async fn list_by_payment(&self, payment_id: Uuid) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .inner
            .read()
            .await
            .values()
            .filter(|t| t.payment_id == payment_id)
            .cloned()
            .collect();
        tickets.sort_by_key(|t| t.issue_time);
        Ok(tickets)
    }
}
