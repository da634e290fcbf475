//! Geographic value types shared by every stage of the pipeline.

use serde::{Deserialize, Serialize};

/// A single coordinate pair.
///
/// Serialized as `[longitude, latitude]`, the order routing providers expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Waypoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl Waypoint {
    /// Point from longitude and latitude, in that order.
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// True when both components are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }
}

impl From<[f64; 2]> for Waypoint {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Waypoint> for [f64; 2] {
    fn from(point: Waypoint) -> Self {
        [point.longitude, point.latitude]
    }
}

/// Axis-aligned rectangle around a route geometry.
///
/// Wire form is `[minLon, minLat, maxLon, maxLat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Smallest box covering `points`, or `None` for an empty slice.
    pub fn from_points(points: &[Waypoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let seed = Self {
            min_lon: first.longitude,
            min_lat: first.latitude,
            max_lon: first.longitude,
            max_lat: first.latitude,
        };
        Some(rest.iter().fold(seed, |bbox, point| bbox.extend(*point)))
    }

    /// Grows the box to cover `point`.
    pub fn extend(self, point: Waypoint) -> Self {
        Self {
            min_lon: self.min_lon.min(point.longitude),
            min_lat: self.min_lat.min(point.latitude),
            max_lon: self.max_lon.max(point.longitude),
            max_lat: self.max_lat.max(point.latitude),
        }
    }

    /// Smallest box covering both boxes.
    pub fn union(self, other: Self) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// True when `point` lies inside or on the edge of the box.
    pub fn contains(&self, point: Waypoint) -> bool {
        (self.min_lon..=self.max_lon).contains(&point.longitude)
            && (self.min_lat..=self.max_lat).contains(&point.latitude)
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([min_lon, min_lat, max_lon, max_lat]: [f64; 4]) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat]
    }
}
