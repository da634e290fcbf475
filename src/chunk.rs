//! Chunk planning: split a sequence into provider-sized requests.
//!
//! Interior points are grouped by list position, `max_waypoints` at a time.
//! Every group but the last gives up its final point as the chunk
//! destination, which then becomes the next chunk's origin. The last group
//! keeps all of its points as intermediates and ends at the sequence's final
//! point.

use serde::{Deserialize, Serialize};

use crate::error::StitchError;
use crate::geo::Waypoint;
use crate::sequence::Sequence;

/// Default provider cap on intermediate waypoints per request.
pub const DEFAULT_MAX_WAYPOINTS: usize = 23;

/// One provider request worth of waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub intermediate: Vec<Waypoint>,
}

impl Chunk {
    /// Total positions sent to the provider, endpoints included.
    pub fn waypoint_count(&self) -> usize {
        self.intermediate.len() + 2
    }

    /// Origin, intermediates and destination in travel order.
    pub fn points(&self) -> impl Iterator<Item = Waypoint> + '_ {
        std::iter::once(self.origin)
            .chain(self.intermediate.iter().copied())
            .chain(std::iter::once(self.destination))
    }
}

/// Partitions `sequence` into chained chunks.
///
/// Produces `ceil(interior / max_waypoints)` chunks, or a single direct
/// chunk when the sequence has no interior points.
pub fn plan_chunks(sequence: &Sequence, max_waypoints: usize) -> Result<Vec<Chunk>, StitchError> {
    if max_waypoints == 0 {
        return Err(StitchError::InvalidChunkSize);
    }

    let interior = sequence.interior();
    let final_destination = sequence.last();
    if interior.is_empty() {
        return Ok(vec![Chunk {
            origin: sequence.first(),
            destination: final_destination,
            intermediate: Vec::new(),
        }]);
    }

    let group_count = interior.len().div_ceil(max_waypoints);
    let chunks = interior
        .chunks(max_waypoints)
        .enumerate()
        .scan(sequence.first(), |origin, (index, group)| {
            // Last group is found by position against the total count.
            let is_last = index == group_count - 1;
            let chunk = match group.split_last() {
                Some((destination, intermediate)) if !is_last => Chunk {
                    origin: *origin,
                    destination: *destination,
                    intermediate: intermediate.to_vec(),
                },
                _ => Chunk {
                    origin: *origin,
                    destination: final_destination,
                    intermediate: group.to_vec(),
                },
            };
            *origin = chunk.destination;
            Some(chunk)
        })
        .collect();

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPOT: Waypoint = Waypoint::new(0.0, 0.0);

    /// Depot, `interior` numbered stops (stop `n` sits at longitude `n`), depot.
    fn round_trip(interior: usize) -> Sequence {
        let mut points = vec![DEPOT];
        points.extend((1..=interior).map(|n| Waypoint::new(n as f64, 1.0)));
        points.push(DEPOT);
        Sequence::new(points).unwrap()
    }

    fn stop(n: usize) -> Waypoint {
        Waypoint::new(n as f64, 1.0)
    }

    fn reassemble(chunks: &[Chunk]) -> Vec<Waypoint> {
        let mut points = vec![chunks[0].origin];
        for chunk in chunks {
            points.extend(chunk.intermediate.iter().copied());
            points.push(chunk.destination);
        }
        points
    }

    #[test]
    fn test_small_route_is_one_chunk() {
        let sequence = round_trip(3);
        let chunks = plan_chunks(&sequence, 23).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].origin, DEPOT);
        assert_eq!(chunks[0].destination, DEPOT);
        assert_eq!(chunks[0].intermediate, vec![stop(1), stop(2), stop(3)]);
    }

    #[test]
    fn test_no_interior_points() {
        let sequence = Sequence::new(vec![DEPOT, stop(9)]).unwrap();
        let chunks = plan_chunks(&sequence, 23).unwrap();

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].intermediate.is_empty());
        assert_eq!(chunks[0].destination, stop(9));
    }

    #[test]
    fn test_thirty_interior_points() {
        let chunks = plan_chunks(&round_trip(30), 23).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].destination, stop(23));
        assert_eq!(chunks[0].intermediate.len(), 22);
        assert_eq!(chunks[1].origin, stop(23));
        assert_eq!(
            chunks[1].intermediate,
            (24..=30).map(stop).collect::<Vec<_>>()
        );
        assert_eq!(chunks[1].destination, DEPOT);
    }

    #[test]
    fn test_exact_multiple_of_cap() {
        let chunks = plan_chunks(&round_trip(46), 23).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].intermediate.len(), 22);
        assert_eq!(chunks[0].destination, stop(23));
        assert_eq!(chunks[1].intermediate.len(), 23);
        assert_eq!(chunks[1].intermediate[0], stop(24));
        assert_eq!(chunks[1].destination, DEPOT);
    }

    #[test]
    fn test_three_groups_final_chunk_is_the_true_last() {
        // A counter compared against `count - 1` after incrementing would
        // close the second chunk at the depot; position comparison must not.
        let chunks = plan_chunks(&round_trip(60), 23).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].destination, stop(23));
        assert_eq!(chunks[1].origin, stop(23));
        assert_eq!(chunks[1].destination, stop(46));
        assert_eq!(chunks[1].intermediate.len(), 22);
        assert_eq!(chunks[2].origin, stop(46));
        assert_eq!(chunks[2].intermediate.len(), 14);
        assert_eq!(chunks[2].destination, DEPOT);
    }

    #[test]
    fn test_chunk_count_is_ceiling() {
        for cap in 1..=7 {
            for interior in 0..=40 {
                let chunks = plan_chunks(&round_trip(interior), cap).unwrap();
                let expected = interior.div_ceil(cap).max(1);
                assert_eq!(chunks.len(), expected, "interior={interior} cap={cap}");
            }
        }
    }

    #[test]
    fn test_chunks_reassemble_sequence() {
        for cap in [1, 2, 5, 23] {
            for interior in [0, 1, 4, 22, 23, 24, 47, 70] {
                let sequence = round_trip(interior);
                let chunks = plan_chunks(&sequence, cap).unwrap();

                assert_eq!(reassemble(&chunks), sequence.points());
                for pair in chunks.windows(2) {
                    assert_eq!(pair[1].origin, pair[0].destination);
                }
                assert!(chunks.iter().all(|chunk| chunk.intermediate.len() <= cap));
            }
        }
    }

    #[test]
    fn test_zero_cap_rejected() {
        let err = plan_chunks(&round_trip(3), 0).unwrap_err();
        assert!(matches!(err, StitchError::InvalidChunkSize));
    }

    #[test]
    fn test_points_and_count() {
        let chunk = Chunk {
            origin: DEPOT,
            destination: stop(3),
            intermediate: vec![stop(1), stop(2)],
        };
        assert_eq!(chunk.waypoint_count(), 4);
        assert_eq!(
            chunk.points().collect::<Vec<_>>(),
            vec![DEPOT, stop(1), stop(2), stop(3)]
        );
    }
}
