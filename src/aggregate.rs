//! Folding per-chunk provider results into one route.

use serde::{Deserialize, Serialize};

use crate::route::{ChunkRoute, Leg, RouteSummary};

/// How the aggregate's bounding box is derived from chunk boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundingBoxStrategy {
    /// Box of the last folded chunk. Cheap, but only covers that chunk.
    #[default]
    LastChunk,
    /// Geographic union of every chunk's box.
    Union,
}

/// Stitched route: legs in chunk order plus a combined summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRoute {
    pub legs: Vec<Leg>,
    pub summary: RouteSummary,
}

impl AggregatedRoute {
    /// Route with no legs and a zeroed summary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends one chunk's result.
    ///
    /// Distance and duration add up. Unit and data source are taken from
    /// `chunk`, as is the bounding box unless `strategy` asks for a union.
    pub fn merge(mut self, chunk: ChunkRoute, strategy: BoundingBoxStrategy) -> Self {
        let ChunkRoute { legs, summary } = chunk;
        self.legs.extend(legs);

        let bounding_box = match (strategy, self.summary.bounding_box, summary.bounding_box) {
            (BoundingBoxStrategy::Union, Some(acc), Some(next)) => Some(acc.union(next)),
            (BoundingBoxStrategy::Union, acc, next) => next.or(acc),
            (BoundingBoxStrategy::LastChunk, _, next) => next,
        };

        self.summary = RouteSummary {
            distance: self.summary.distance + summary.distance,
            duration_seconds: self.summary.duration_seconds + summary.duration_seconds,
            distance_unit: summary.distance_unit,
            data_source: summary.data_source,
            bounding_box,
        };
        self
    }
}

/// Left fold over chunk results in chunk order.
pub fn aggregate<I>(chunks: I, strategy: BoundingBoxStrategy) -> AggregatedRoute
where
    I: IntoIterator<Item = ChunkRoute>,
{
    chunks
        .into_iter()
        .fold(AggregatedRoute::empty(), |acc, chunk| acc.merge(chunk, strategy))
}
