//! OSRM HTTP adapter for chunk routes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chunk::Chunk;
use crate::error::ProviderError;
use crate::geo::{BoundingBox, Waypoint};
use crate::route::{
    ChunkRoute, DistanceUnit, Leg, LegGeometry, RouteOptions, RouteRequest, RouteSummary, Step,
    TravelMode,
};
use crate::traits::RouteProvider;

pub const DATA_SOURCE: &str = "OSRM";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// OSRM profile name serving `mode`. OSRM has no truck profile.
pub fn profile_for(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Car | TravelMode::Truck => "car",
        TravelMode::Walking => "foot",
        TravelMode::Bicycle => "bike",
    }
}

#[derive(Debug, Clone)]
pub struct OsrmRouteProvider {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmRouteProvider {
    /// Builds the blocking client with the configured timeout.
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// `/route/v1` URL for `request`, coordinates as `lon,lat` pairs.
    pub fn route_url(&self, request: &RouteRequest) -> String {
        let coords = request
            .points()
            .map(|point| format!("{:.6},{:.6}", point.longitude, point.latitude))
            .collect::<Vec<_>>()
            .join(";");

        let mut url = format!(
            "{}/route/v1/{}/{}?steps=true&geometries=geojson&overview=false",
            self.config.base_url.trim_end_matches('/'),
            profile_for(request.travel_mode),
            coords
        );
        if request.avoid_tolls {
            url.push_str("&exclude=toll");
        }
        url
    }
}

impl RouteProvider for OsrmRouteProvider {
    fn compute_route(
        &self,
        chunk: &Chunk,
        options: &RouteOptions,
    ) -> Result<ChunkRoute, ProviderError> {
        let request = RouteRequest::new(chunk, options);
        debug!(waypoints = request.waypoints.len(), "requesting OSRM route");
        let response = self.client.get(self.route_url(&request)).send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "OSRM route request rejected");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: OsrmRouteResponse = serde_json::from_str(&text)?;
        into_chunk_route(body, chunk, options)
    }
}

fn into_chunk_route(
    body: OsrmRouteResponse,
    chunk: &Chunk,
    options: &RouteOptions,
) -> Result<ChunkRoute, ProviderError> {
    if body.code != "Ok" {
        return Err(ProviderError::NoRoute(
            body.message.unwrap_or(body.code),
        ));
    }
    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::NoRoute("empty routes array".to_string()))?;

    let requested: Vec<Waypoint> = chunk.points().collect();
    if route.legs.len() + 1 != requested.len() {
        return Err(ProviderError::Other(format!(
            "expected {} legs, OSRM returned {}",
            requested.len() - 1,
            route.legs.len()
        )));
    }
    let snapped: Vec<Waypoint> = match body.waypoints {
        Some(waypoints) if waypoints.len() == requested.len() => {
            waypoints.into_iter().map(|waypoint| waypoint.location).collect()
        }
        _ => requested,
    };

    let unit = options.distance_unit;
    let legs: Vec<Leg> = route
        .legs
        .into_iter()
        .enumerate()
        .map(|(index, leg)| build_leg(leg, snapped[index], snapped[index + 1], unit, options))
        .collect();

    let path_points: Vec<Waypoint> = legs
        .iter()
        .flat_map(|leg| leg.geometry.path.iter().copied())
        .chain(snapped.iter().copied())
        .collect();

    Ok(ChunkRoute {
        summary: RouteSummary {
            distance: unit.convert_meters(route.distance),
            duration_seconds: route.duration,
            distance_unit: unit,
            data_source: DATA_SOURCE.to_string(),
            bounding_box: BoundingBox::from_points(&path_points),
        },
        legs,
    })
}

fn build_leg(
    leg: OsrmLeg,
    start: Waypoint,
    end: Waypoint,
    unit: DistanceUnit,
    options: &RouteOptions,
) -> Leg {
    let mut path: Vec<Waypoint> = Vec::new();
    let mut steps = Vec::with_capacity(leg.steps.len());

    for step in leg.steps {
        let coordinates = step.geometry.coordinates;
        // Consecutive steps share their joint coordinate.
        let skip = usize::from(path.last().is_some() && path.last() == coordinates.first());
        let offset = path.len().saturating_sub(skip);
        let end_position = coordinates.last().copied().unwrap_or(step.maneuver.location);
        path.extend(coordinates.into_iter().skip(skip));

        steps.push(Step {
            start_position: step.maneuver.location,
            end_position,
            distance: unit.convert_meters(step.distance),
            duration_seconds: step.duration,
            geometry_offset: Some(offset),
            instruction: step.maneuver.describe(&step.name),
        });
    }

    if !options.include_geometry {
        path.clear();
        steps.iter_mut().for_each(|step| step.geometry_offset = None);
    }

    Leg {
        geometry: LegGeometry { path },
        steps,
        duration_seconds: leg.duration,
        distance: unit.convert_meters(leg.distance),
        start_position: start,
        end_position: end,
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
    #[serde(default)]
    waypoints: Option<Vec<OsrmWaypoint>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    maneuver: OsrmManeuver,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<Waypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    location: Waypoint,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    modifier: Option<String>,
}

impl OsrmManeuver {
    fn describe(&self, road: &str) -> Option<String> {
        let mut text = self.kind.clone();
        if let Some(modifier) = &self.modifier {
            text.push(' ');
            text.push_str(modifier);
        }
        if !road.is_empty() {
            text.push_str(" onto ");
            text.push_str(road);
        }
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmWaypoint {
    location: Waypoint,
}
