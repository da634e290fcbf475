//! Test fixtures for route-stitcher.
//!
//! Provides:
//! - Real Las Vegas depots and stops (from OpenStreetMap)
//! - A plain order record and assignment builders
//! - A recording route provider returning deterministic chunk routes
#![allow(dead_code)]

pub mod las_vegas_stops;

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use route_stitcher::assignment::Assignment;
use route_stitcher::chunk::Chunk;
use route_stitcher::error::ProviderError;
use route_stitcher::geo::{BoundingBox, Waypoint};
use route_stitcher::route::{ChunkRoute, Leg, LegGeometry, RouteOptions, RouteSummary};
use route_stitcher::traits::{Order, RouteProvider};

pub use las_vegas_stops::*;

pub const FIXTURE_SOURCE: &str = "Fixture";

#[derive(Debug, Clone)]
pub struct TestOrder {
    pub id: String,
    pub origin: Waypoint,
    pub destination: Waypoint,
}

impl Order for TestOrder {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn origin(&self) -> Waypoint {
        self.origin
    }

    fn destination(&self) -> Waypoint {
        self.destination
    }
}

/// Synthetic stop `n` east of the depot, so position is easy to read back.
pub fn grid_stop(n: usize) -> Waypoint {
    Waypoint::new(-115.17 + n as f64 * 0.0005, 36.11)
}

pub const GRID_DEPOT: Waypoint = Waypoint::new(-115.2, 36.1);

/// One order per destination, all picked up at `depot`, ids `order-1..`.
pub fn assignment_for(
    depot: Waypoint,
    destinations: &[Waypoint],
) -> (Assignment<String>, HashMap<String, TestOrder>) {
    let orders: Vec<TestOrder> = destinations
        .iter()
        .enumerate()
        .map(|(index, destination)| TestOrder {
            id: format!("order-{}", index + 1),
            origin: depot,
            destination: *destination,
        })
        .collect();

    let assignment = Assignment::new("fleet-1", orders.iter().map(|order| order.id.clone()));
    let lookup = orders
        .into_iter()
        .map(|order| (order.id.clone(), order))
        .collect();
    (assignment, lookup)
}

/// Grid assignment with `stops` synthetic destinations.
pub fn grid_assignment(stops: usize) -> (Assignment<String>, HashMap<String, TestOrder>) {
    let destinations: Vec<Waypoint> = (1..=stops).map(grid_stop).collect();
    assignment_for(GRID_DEPOT, &destinations)
}

/// Provider double that records each chunk it is asked to route.
///
/// Every hop becomes one 0.75-unit, 90-second leg. The summary's data source
/// carries the chunk origin's longitude so last-write-wins fields are
/// observable.
#[derive(Default)]
pub struct RecordingProvider {
    pub calls: Mutex<Vec<Chunk>>,
    pub responses: Mutex<Vec<ChunkRoute>>,
    pub fail_when_visiting: Option<Waypoint>,
    /// Earlier calls sleep longer, so parallel results complete out of order.
    pub stagger: bool,
    pub started: AtomicUsize,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(point: Waypoint) -> Self {
        Self {
            fail_when_visiting: Some(point),
            ..Self::default()
        }
    }

    pub fn staggered() -> Self {
        Self {
            stagger: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Chunk> {
        self.calls.lock().unwrap().clone()
    }

    pub fn responses(&self) -> Vec<ChunkRoute> {
        self.responses.lock().unwrap().clone()
    }

    fn route(chunk: &Chunk, options: &RouteOptions) -> ChunkRoute {
        let points: Vec<Waypoint> = chunk.points().collect();
        let legs: Vec<Leg> = points
            .windows(2)
            .map(|pair| Leg {
                geometry: LegGeometry {
                    path: vec![pair[0], pair[1]],
                },
                steps: Vec::new(),
                duration_seconds: 90.0,
                distance: 0.75,
                start_position: pair[0],
                end_position: pair[1],
            })
            .collect();

        ChunkRoute {
            summary: RouteSummary {
                distance: legs.iter().map(|leg| leg.distance).sum(),
                duration_seconds: legs.iter().map(|leg| leg.duration_seconds).sum(),
                distance_unit: options.distance_unit,
                data_source: format!("{}:{:.4}", FIXTURE_SOURCE, chunk.origin.longitude),
                bounding_box: BoundingBox::from_points(&points),
            },
            legs,
        }
    }
}

impl RouteProvider for RecordingProvider {
    fn compute_route(
        &self,
        chunk: &Chunk,
        options: &RouteOptions,
    ) -> Result<ChunkRoute, ProviderError> {
        let call = self.started.fetch_add(1, Ordering::SeqCst) as u64;
        if self.stagger {
            std::thread::sleep(Duration::from_millis(80u64.saturating_sub(call * 20)));
        }

        self.calls.lock().unwrap().push(chunk.clone());
        if let Some(point) = self.fail_when_visiting {
            if chunk.points().any(|p| p == point) {
                return Err(ProviderError::Status {
                    status: 429,
                    body: "rate limit exceeded".to_string(),
                });
            }
        }

        let route = Self::route(chunk, options);
        self.responses.lock().unwrap().push(route.clone());
        Ok(route)
    }
}
