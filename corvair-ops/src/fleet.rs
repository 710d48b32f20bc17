use std::sync::Arc;
use uuid::Uuid;

use corvair_core::repository::{AirportRepository, PlaneRepository};
use corvair_core::{Error, Plane, PlaneStatus, Result};

/// Plane movements that do not cancel anything: deployment to an airport
/// and reactivation out of maintenance.
pub struct FleetOps {
    planes: Arc<dyn PlaneRepository>,
    airports: Arc<dyn AirportRepository>,
}

impl FleetOps {
    pub fn new(planes: Arc<dyn PlaneRepository>, airports: Arc<dyn AirportRepository>) -> Self {
        Self { planes, airports }
    }

    /// Attach an active plane to an airport. Planes in maintenance or
    /// retirement stay in storage.
    pub async fn deploy_plane(&self, plane_id: Uuid, airport_id: Uuid) -> Result<Plane> {
        let plane = self.planes.get(plane_id).await?;
        if plane.status != PlaneStatus::Active {
            return Err(Error::Validation(format!(
                "only active planes can be deployed, plane is {}",
                plane.status
            )));
        }

        let airport = self.airports.get(airport_id).await?;
        self.planes.set_airport(plane_id, Some(airport_id)).await?;
        tracing::info!(%plane_id, airport = %airport.iata_code, "plane deployed");

        self.planes.get(plane_id).await
    }

    /// Return a plane from maintenance to service. It stays in storage
    /// until deployed again; retired planes never come back.
    pub async fn reactivate_plane(&self, plane_id: Uuid) -> Result<Plane> {
        let plane = self.planes.get(plane_id).await?;
        match plane.status {
            PlaneStatus::Retired => Err(Error::invalid_transition(
                PlaneStatus::Retired,
                PlaneStatus::Active,
            )),
            PlaneStatus::Active => Err(Error::Validation("plane is already active".into())),
            PlaneStatus::Maintenance => {
                self.planes.set_status(plane_id, PlaneStatus::Active).await?;
                tracing::info!(%plane_id, "plane reactivated");
                self.planes.get(plane_id).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvair_core::Airport;
    use corvair_store::{MemoryAirportRepository, MemoryPlaneRepository};

    async fn fleet() -> (FleetOps, Arc<MemoryPlaneRepository>, Uuid, Uuid) {
        let planes = Arc::new(MemoryPlaneRepository::new());
        let airports = Arc::new(MemoryAirportRepository::new());

        let airport = Airport {
            id: Uuid::new_v4(),
            iata_code: "IST".into(),
            name: "Istanbul".into(),
        };
        let airport_id = airport.id;
        airports.insert(airport).await.unwrap();

        let plane = Plane {
            id: Uuid::new_v4(),
            model_type: "737-800".into(),
            status: PlaneStatus::Active,
            airport_id: None,
        };
        let plane_id = plane.id;
        planes.insert(plane).await.unwrap();

        (FleetOps::new(planes.clone(), airports), planes, plane_id, airport_id)
    }

    #[tokio::test]
    async fn deploys_active_plane() {
        let (fleet, _planes, plane_id, airport_id) = fleet().await;
        let plane = fleet.deploy_plane(plane_id, airport_id).await.unwrap();
        assert_eq!(plane.airport_id, Some(airport_id));
    }

    #[tokio::test]
    async fn maintenance_plane_cannot_deploy() {
        let (fleet, planes, plane_id, airport_id) = fleet().await;
        planes.set_status(plane_id, PlaneStatus::Maintenance).await.unwrap();

        let err = fleet.deploy_plane(plane_id, airport_id).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn retired_plane_never_reactivates() {
        let (fleet, planes, plane_id, _airport_id) = fleet().await;
        planes.set_status(plane_id, PlaneStatus::Retired).await.unwrap();

        let err = fleet.reactivate_plane(plane_id).await.unwrap_err();
        assert!(matches!(err, Error::InvalidStateTransition { .. }));
    }

    #[tokio::test]
    async fn maintenance_plane_reactivates_into_storage() {
        let (fleet, planes, plane_id, _airport_id) = fleet().await;
        planes.set_status(plane_id, PlaneStatus::Maintenance).await.unwrap();

        let plane = fleet.reactivate_plane(plane_id).await.unwrap();
        assert_eq!(plane.status, PlaneStatus::Active);
        assert_eq!(plane.airport_id, None);
    }
}
