//! Route stitching pipeline.
//!
//! assignment -> sequence -> chunks -> provider (per chunk) -> aggregate -> encode.
//!
//! Chunk boundaries depend only on sequence positions, so provider calls are
//! independent of each other. They run either one after another or on a
//! bounded rayon pool; in both cases results are folded in chunk order.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::aggregate::{AggregatedRoute, BoundingBoxStrategy, aggregate};
use crate::assignment::Assignment;
use crate::chunk::{Chunk, DEFAULT_MAX_WAYPOINTS, plan_chunks};
use crate::error::{RouteFailure, StitchError};
use crate::polyline;
use crate::route::{ChunkRoute, EncodedGeometry, EncodedLeg, RouteOptions, RouteResponse};
use crate::sequence::{Sequence, build_sequence};
use crate::traits::{Order, OrderLookup, RouteProvider};

/// How chunk requests are issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum Dispatch {
    #[default]
    Sequential,
    /// At most `max_in_flight` provider calls at once; 0 is rejected.
    #[serde(rename_all = "camelCase")]
    Parallel { max_in_flight: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StitchConfig {
    /// Provider cap on intermediate waypoints per request.
    pub max_waypoints_per_request: usize,
    pub dispatch: Dispatch,
    pub bounding_box: BoundingBoxStrategy,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            max_waypoints_per_request: DEFAULT_MAX_WAYPOINTS,
            dispatch: Dispatch::Sequential,
            bounding_box: BoundingBoxStrategy::LastChunk,
        }
    }
}

pub struct RouteStitcher<P> {
    provider: P,
    config: StitchConfig,
    pool: Option<ThreadPool>,
}

impl<P> RouteStitcher<P>
where
    P: RouteProvider,
{
    /// Validates `config` and builds the dispatch pool for parallel mode.
    pub fn new(provider: P, config: StitchConfig) -> Result<Self, StitchError> {
        if config.max_waypoints_per_request == 0 {
            return Err(StitchError::InvalidChunkSize);
        }

        let pool = match config.dispatch {
            Dispatch::Sequential => None,
            Dispatch::Parallel { max_in_flight: 0 } => {
                return Err(StitchError::InvalidConcurrency);
            }
            Dispatch::Parallel { max_in_flight } => Some(
                ThreadPoolBuilder::new()
                    .num_threads(max_in_flight)
                    .thread_name(|index| format!("route-chunk-{}", index))
                    .build()?,
            ),
        };

        Ok(Self {
            provider,
            config,
            pool,
        })
    }

    /// The wrapped route provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Configuration this stitcher was built with.
    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Routes a whole assignment and encodes the result.
    ///
    /// Diagnostics are logged here; the caller only learns the failure kind.
    pub fn route_assignment<L>(
        &self,
        assignment: &Assignment<<L::Order as Order>::Id>,
        lookup: &L,
        back_to_origin: Option<bool>,
        options: &RouteOptions,
    ) -> Result<RouteResponse, RouteFailure>
    where
        L: OrderLookup,
    {
        self.try_route_assignment(assignment, lookup, back_to_origin, options)
            .map_err(|err| {
                error!(
                    fleet_id = %assignment.fleet_id,
                    stops = assignment.orders.len(),
                    kind = ?err.kind(),
                    error = %err,
                    "route computation failed"
                );
                RouteFailure::from(&err)
            })
    }

    /// Same as `route_assignment` but keeps the detailed error.
    pub fn try_route_assignment<L>(
        &self,
        assignment: &Assignment<<L::Order as Order>::Id>,
        lookup: &L,
        back_to_origin: Option<bool>,
        options: &RouteOptions,
    ) -> Result<RouteResponse, StitchError>
    where
        L: OrderLookup,
    {
        let sequence = build_sequence(assignment, lookup, back_to_origin)?;
        let route = self.route_sequence(&sequence, options)?;
        let response = encode_route(route)?;

        info!(
            fleet_id = %assignment.fleet_id,
            stops = assignment.orders.len(),
            legs = response.legs.len(),
            distance = response.summary.distance,
            duration_seconds = response.summary.duration_seconds,
            "route computed"
        );
        Ok(response)
    }

    /// Plans chunks for `sequence`, routes each one and stitches the results.
    /// The first failing chunk abandons the whole route.
    pub fn route_sequence(
        &self,
        sequence: &Sequence,
        options: &RouteOptions,
    ) -> Result<AggregatedRoute, StitchError> {
        let chunks = plan_chunks(sequence, self.config.max_waypoints_per_request)?;
        debug!(
            points = sequence.len(),
            chunks = chunks.len(),
            "planned route chunks"
        );

        let strategy = self.config.bounding_box;
        match &self.pool {
            None => chunks
                .iter()
                .enumerate()
                .try_fold(AggregatedRoute::empty(), |acc, (index, chunk)| -> Result<_, StitchError> {
                    let routed = self.route_chunk(index, chunk, options)?;
                    Ok(acc.merge(routed, strategy))
                }),
            Some(pool) => {
                let routed = pool.install(|| {
                    chunks
                        .par_iter()
                        .enumerate()
                        .map(|(index, chunk)| self.route_chunk(index, chunk, options))
                        .collect::<Result<Vec<_>, _>>()
                })?;
                Ok(aggregate(routed, strategy))
            }
        }
    }

    fn route_chunk(
        &self,
        index: usize,
        chunk: &Chunk,
        options: &RouteOptions,
    ) -> Result<ChunkRoute, StitchError> {
        debug!(
            chunk = index,
            waypoints = chunk.waypoint_count(),
            "requesting chunk route"
        );
        self.provider
            .compute_route(chunk, options)
            .map_err(|source| StitchError::ProviderRequestFailure {
                chunk: index,
                source,
            })
    }
}

/// Replaces every leg's coordinate path with its precision-6 polyline.
pub fn encode_route(route: AggregatedRoute) -> Result<RouteResponse, StitchError> {
    let AggregatedRoute { legs, summary } = route;
    let legs = legs
        .into_iter()
        .enumerate()
        .map(|(index, leg)| {
            let encoded_path = polyline::encode(&leg.geometry.path)
                .map_err(|source| StitchError::EncodingFailure { leg: index, source })?;
            Ok(EncodedLeg {
                geometry: EncodedGeometry { encoded_path },
                steps: leg.steps,
                duration_seconds: leg.duration_seconds,
                distance: leg.distance,
                start_position: leg.start_position,
                end_position: leg.end_position,
            })
        })
        .collect::<Result<Vec<_>, StitchError>>()?;

    Ok(RouteResponse { legs, summary })
}
