use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use corvair_core::repository::{AirportRepository, PlaneRepository};
use corvair_core::{Airport, Error, Plane, PlaneStatus, Result};

pub struct MemoryPlaneRepository {
    inner: RwLock<HashMap<Uuid, Plane>>,
}

impl MemoryPlaneRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryPlaneRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaneRepository for MemoryPlaneRepository {
    async fn get(&self, id: Uuid) -> Result<Plane> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("plane", id))
    }

    async fn insert(&self, plane: Plane) -> Result<()> {
        self.inner.write().await.insert(plane.id, plane);
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: PlaneStatus) -> Result<()> {
        let mut map = self.inner.write().await;
        let plane = map.get_mut(&id).ok_or_else(|| Error::not_found("plane", id))?;
        plane.status = status;
        Ok(())
    }

    async fn set_airport(&self, id: Uuid, airport_id: Option<Uuid>) -> Result<()> {
        let mut map = self.inner.write().await;
        let plane = map.get_mut(&id).ok_or_else(|| Error::not_found("plane", id))?;
        plane.airport_id = airport_id;
        Ok(())
    }

    async fn list_by_airport(&self, airport_id: Uuid) -> Result<Vec<Plane>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .filter(|p| p.airport_id == Some(airport_id))
            .cloned()
            .collect())
    }
}

pub struct MemoryAirportRepository {
    inner: RwLock<HashMap<Uuid, Airport>>,
}

impl MemoryAirportRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryAirportRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AirportRepository for MemoryAirportRepository {
    async fn get(&self, id: Uuid) -> Result<Airport> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("airport", id))
    }

    async fn insert(&self, airport: Airport) -> Result<()> {
        self.inner.write().await.insert(airport.id, airport);
        Ok(())
    }
}
