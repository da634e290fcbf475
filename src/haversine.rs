//! Straight-line route provider (fallback when no routing service is reachable).
//!
//! Every leg is a great-circle segment between consecutive chunk points.
//! Travel time comes from an assumed speed, so results ignore roads entirely.

use crate::chunk::Chunk;
use crate::error::ProviderError;
use crate::geo::{BoundingBox, Waypoint};
use crate::route::{ChunkRoute, Leg, LegGeometry, RouteOptions, RouteSummary, Step, TravelMode};
use crate::traits::RouteProvider;

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;
const WALKING_SPEED_KMH: f64 = 5.0;
const CYCLING_SPEED_KMH: f64 = 15.0;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub const DATA_SOURCE: &str = "StraightLine";

/// Great-circle distance between two points in meters.
pub fn haversine_m(from: Waypoint, to: Waypoint) -> f64 {
    let (phi_from, phi_to) = (from.latitude.to_radians(), to.latitude.to_radians());
    let half_dphi = (phi_to - phi_from) / 2.0;
    let half_dlambda = (to.longitude - from.longitude).to_radians() / 2.0;

    let h = half_dphi.sin().powi(2) + phi_from.cos() * phi_to.cos() * half_dlambda.sin().powi(2);
    // `h` may round a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[derive(Debug, Clone)]
pub struct StraightLineProvider {
    /// Assumed average driving speed in km/h. Walking and cycling use fixed speeds.
    pub speed_kmh: f64,
}

impl Default for StraightLineProvider {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl StraightLineProvider {
    /// Provider assuming `speed_kmh` for car and truck routes.
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    fn speed_for(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Car | TravelMode::Truck => self.speed_kmh,
            TravelMode::Walking => WALKING_SPEED_KMH,
            TravelMode::Bicycle => CYCLING_SPEED_KMH,
        }
    }

    fn leg(&self, from: Waypoint, to: Waypoint, options: &RouteOptions) -> Leg {
        let meters = haversine_m(from, to);
        let distance = options.distance_unit.convert_meters(meters);
        let duration_seconds = meters / 1000.0 / self.speed_for(options.travel_mode) * 3600.0;

        Leg {
            geometry: LegGeometry {
                path: vec![from, to],
            },
            steps: vec![Step {
                start_position: from,
                end_position: to,
                distance,
                duration_seconds,
                geometry_offset: Some(0),
                instruction: None,
            }],
            duration_seconds,
            distance,
            start_position: from,
            end_position: to,
        }
    }
}

impl RouteProvider for StraightLineProvider {
    fn compute_route(
        &self,
        chunk: &Chunk,
        options: &RouteOptions,
    ) -> Result<ChunkRoute, ProviderError> {
        if !(self.speed_kmh.is_finite() && self.speed_kmh > 0.0) {
            return Err(ProviderError::Other(format!(
                "invalid straight-line speed {} km/h",
                self.speed_kmh
            )));
        }

        let points: Vec<Waypoint> = chunk.points().collect();
        let legs: Vec<Leg> = points
            .windows(2)
            .map(|pair| self.leg(pair[0], pair[1], options))
            .collect();

        let summary = RouteSummary {
            distance: legs.iter().map(|leg| leg.distance).sum(),
            duration_seconds: legs.iter().map(|leg| leg.duration_seconds).sum(),
            distance_unit: options.distance_unit,
            data_source: DATA_SOURCE.to_string(),
            bounding_box: BoundingBox::from_points(&points),
        };

        Ok(ChunkRoute { legs, summary })
    }
}
