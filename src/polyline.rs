//! Polyline representation and encoding for leg geometries.
//!
//! Paths are kept as decoded `Waypoint`s while the route is assembled and
//! only encoded once, when the response is built. The string format is the
//! common delta/varint polyline algorithm at 6 decimal digits, latitude
//! first in each pair.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Waypoint;

const PRECISION: f64 = 1e6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolylineError {
    #[error("coordinate {index} is not encodable: {point:?}")]
    InvalidCoordinate { index: usize, point: Waypoint },

    #[error("malformed polyline at byte {position}")]
    Malformed { position: usize },
}

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Waypoint>,
}

impl Polyline {
    /// Wraps already decoded points.
    pub fn new(points: Vec<Waypoint>) -> Self {
        Self { points }
    }

    /// Coordinates in path order.
    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    /// Consumes the polyline, returning its coordinates.
    pub fn into_points(self) -> Vec<Waypoint> {
        self.points
    }

    /// Encodes this path at precision 6.
    pub fn encode(&self) -> Result<String, PolylineError> {
        encode(&self.points)
    }

    /// Parses an encoded path.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        decode(encoded).map(Self::new)
    }
}

/// Encodes `points` at precision 6.
pub fn encode(points: &[Waypoint]) -> Result<String, PolylineError> {
    let mut out = String::with_capacity(points.len() * 8);
    let mut previous = (0_i64, 0_i64);

    for (index, point) in points.iter().enumerate() {
        if !point.is_valid() {
            return Err(PolylineError::InvalidCoordinate {
                index,
                point: *point,
            });
        }
        let lat = scale(point.latitude);
        let lon = scale(point.longitude);
        push_value(&mut out, lat - previous.0);
        push_value(&mut out, lon - previous.1);
        previous = (lat, lon);
    }

    Ok(out)
}

/// Decodes a precision-6 polyline back into coordinates.
pub fn decode(encoded: &str) -> Result<Vec<Waypoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut position = 0;
    let mut current = (0_i64, 0_i64);
    let mut points = Vec::new();

    while position < bytes.len() {
        let start = position;
        let lat_delta = read_value(bytes, &mut position)?;
        if position >= bytes.len() {
            return Err(PolylineError::Malformed { position });
        }
        let lon_delta = read_value(bytes, &mut position)?;

        let lat = current.0.checked_add(lat_delta);
        let lon = current.1.checked_add(lon_delta);
        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(PolylineError::Malformed { position: start });
        };
        current = (lat, lon);

        let point = Waypoint::new(lon as f64 / PRECISION, lat as f64 / PRECISION);
        // Only pairs `encode` would accept decode successfully.
        if !point.is_valid() {
            return Err(PolylineError::Malformed { position: start });
        }
        points.push(point);
    }

    Ok(points)
}

fn scale(coordinate: f64) -> i64 {
    (coordinate * PRECISION).round() as i64
}

fn push_value(out: &mut String, value: i64) {
    let mut bits = (if value < 0 { !(value << 1) } else { value << 1 }) as u64;
    while bits >= 0x20 {
        out.push(char::from((0x20 | (bits & 0x1f)) as u8 + 63));
        bits >>= 5;
    }
    out.push(char::from(bits as u8 + 63));
}

fn read_value(bytes: &[u8], position: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*position)
            .ok_or(PolylineError::Malformed { position: *position })?;
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(PolylineError::Malformed { position: *position });
        }
        *position += 1;

        let chunk = u64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    let value = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !value } else { value })
}
