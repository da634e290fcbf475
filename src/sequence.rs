//! Waypoint sequence construction from an assignment.

use tracing::debug;

use crate::assignment::{Assignment, routes_back};
use crate::error::StitchError;
use crate::geo::Waypoint;
use crate::traits::{Order, OrderLookup};

/// Ordered route points: depot first, then one point per stop, optionally
/// the depot again. Always holds at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    points: Vec<Waypoint>,
}

impl Sequence {
    /// Wraps pre-built points. Fails with `EmptySequence` below two points.
    pub fn new(points: Vec<Waypoint>) -> Result<Self, StitchError> {
        if points.len() < 2 {
            return Err(StitchError::EmptySequence);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Depot the route starts from.
    pub fn first(&self) -> Waypoint {
        self.points[0]
    }

    /// Final stop, the depot again for round trips.
    pub fn last(&self) -> Waypoint {
        self.points[self.points.len() - 1]
    }

    /// Points strictly between the first and the last.
    pub fn interior(&self) -> &[Waypoint] {
        &self.points[1..self.points.len() - 1]
    }
}

/// Builds the route sequence for `assignment`.
///
/// The depot is the first stop's recorded origin. When the vehicle routes
/// back (`back_to_origin` unset or `true`) the depot closes the sequence.
pub fn build_sequence<L>(
    assignment: &Assignment<<L::Order as Order>::Id>,
    lookup: &L,
    back_to_origin: Option<bool>,
) -> Result<Sequence, StitchError>
where
    L: OrderLookup,
{
    if assignment.orders.is_empty() {
        return Err(StitchError::EmptySequence);
    }

    let orders = assignment
        .stop_ids()
        .map(|id| {
            lookup.order(id).ok_or_else(|| StitchError::OrderNotFound {
                id: format!("{:?}", id),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let origin = orders[0].origin();
    ensure_valid(orders[0], origin)?;

    let mut points = Vec::with_capacity(orders.len() + 2);
    points.push(origin);
    for order in &orders {
        let destination = order.destination();
        ensure_valid(*order, destination)?;
        points.push(destination);
    }
    if routes_back(back_to_origin) {
        points.push(origin);
    }

    debug!(
        fleet_id = %assignment.fleet_id,
        stops = orders.len(),
        points = points.len(),
        "built waypoint sequence"
    );

    Sequence::new(points)
}

fn ensure_valid<O: Order>(order: &O, point: Waypoint) -> Result<(), StitchError> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(StitchError::InvalidWaypoint {
            id: format!("{:?}", order.id()),
            point,
        })
    }
}
