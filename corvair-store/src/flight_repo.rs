use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use corvair_core::repository::FlightRepository;
use corvair_core::{Error, Flight, FlightStatus, Result};

pub struct MemoryFlightRepository {
    inner: RwLock<HashMap<Uuid, Flight>>,
}

impl MemoryFlightRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryFlightRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlightRepository for MemoryFlightRepository {
    async fn get(&self, id: Uuid) -> Result<Flight> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("flight", id))
    }

    async fn insert(&self, flight: Flight) -> Result<()> {
        self.inner.write().await.insert(flight.id, flight);
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: FlightStatus) -> Result<()> {
        let mut map = self.inner.write().await;
        let flight = map.get_mut(&id).ok_or_else(|| Error::not_found("flight", id))?;
        flight.status = status;
        Ok(())
    }

    async fn list_by_plane(&self, plane_id: Uuid) -> Result<Vec<Flight>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .filter(|f| f.plane_id == plane_id)
            .cloned()
            .collect())
    }

    async fn list_by_airport(&self, airport_id: Uuid) -> Result<Vec<Flight>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .filter(|f| f.origin_airport_id == airport_id || f.destination_airport_id == airport_id)
            .cloned()
            .collect())
    }
}
