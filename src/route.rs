//! Provider request/response shapes and the encoded output returned to callers.

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;
use crate::geo::{BoundingBox, Waypoint};

const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_MILE: f64 = 1609.344;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    #[default]
    Car,
    Truck,
    Walking,
    Bicycle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Converts a provider distance in meters into this unit.
    pub fn convert_meters(&self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => meters / METERS_PER_KILOMETER,
            DistanceUnit::Miles => meters / METERS_PER_MILE,
        }
    }
}

/// Options forwarded unchanged to every chunk request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteOptions {
    pub avoid_tolls: bool,
    pub travel_mode: TravelMode,
    pub distance_unit: DistanceUnit,
    pub include_geometry: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            avoid_tolls: false,
            travel_mode: TravelMode::Car,
            distance_unit: DistanceUnit::Kilometers,
            include_geometry: true,
        }
    }
}

/// Wire form of one chunk's provider request.
///
/// HTTP providers build one per chunk; it is also the JSON body a host-side
/// provider receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub waypoints: Vec<Waypoint>,
    pub travel_mode: TravelMode,
    pub distance_unit: DistanceUnit,
    pub avoid_tolls: bool,
    pub include_geometry: bool,
}

impl RouteRequest {
    /// Request for `chunk` under `options`.
    pub fn new(chunk: &Chunk, options: &RouteOptions) -> Self {
        Self {
            origin: chunk.origin,
            destination: chunk.destination,
            waypoints: chunk.intermediate.clone(),
            travel_mode: options.travel_mode,
            distance_unit: options.distance_unit,
            avoid_tolls: options.avoid_tolls,
            include_geometry: options.include_geometry,
        }
    }

    /// Origin, waypoints and destination in visiting order.
    pub fn points(&self) -> impl Iterator<Item = Waypoint> + '_ {
        std::iter::once(self.origin)
            .chain(self.waypoints.iter().copied())
            .chain(std::iter::once(self.destination))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub start_position: Waypoint,
    pub end_position: Waypoint,
    pub distance: f64,
    pub duration_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegGeometry {
    pub path: Vec<Waypoint>,
}

/// One directed travel segment as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub geometry: LegGeometry,
    pub steps: Vec<Step>,
    pub duration_seconds: f64,
    pub distance: f64,
    pub start_position: Waypoint,
    pub end_position: Waypoint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub distance: f64,
    pub duration_seconds: f64,
    pub distance_unit: DistanceUnit,
    pub data_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// A provider's answer for one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRoute {
    pub legs: Vec<Leg>,
    pub summary: RouteSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedGeometry {
    pub encoded_path: String,
}

/// A leg whose coordinate path has been replaced by a polyline string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedLeg {
    pub geometry: EncodedGeometry,
    pub steps: Vec<Step>,
    pub duration_seconds: f64,
    pub distance: f64,
    pub start_position: Waypoint,
    pub end_position: Waypoint,
}

/// Final artifact returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub legs: Vec<EncodedLeg>,
    pub summary: RouteSummary,
}
