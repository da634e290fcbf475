//! route-stitcher core
//!
//! Turns one vehicle's ordered stops into a single continuous route by
//! routing provider-sized chunks and stitching the results back together.

pub mod geo;
pub mod traits;
pub mod assignment;
pub mod sequence;
pub mod chunk;
pub mod route;
pub mod aggregate;
pub mod polyline;
pub mod error;
pub mod stitch;
pub mod osrm;
pub mod osrm_data;
pub mod haversine;
