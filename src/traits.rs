//! Collaborator interfaces for the stitching pipeline.
//!
//! Order storage and the routing service live outside this crate. Hosts
//! implement these traits for their own records and clients.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::chunk::Chunk;
use crate::error::ProviderError;
use crate::geo::Waypoint;
use crate::route::{ChunkRoute, RouteOptions};

/// Unique identifier for order records.
pub trait Id: Clone + Eq + Hash + Debug {}

impl<T> Id for T where T: Clone + Eq + Hash + Debug {}

/// An order record as stored upstream.
pub trait Order {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Pickup point. For the first stop of an assignment this is the depot.
    fn origin(&self) -> Waypoint;

    /// Delivery point visited by the vehicle.
    fn destination(&self) -> Waypoint;
}

/// Resolves order ids referenced by an assignment.
pub trait OrderLookup {
    type Order: Order;

    fn order(&self, id: &<Self::Order as Order>::Id) -> Option<&Self::Order>;
}

impl<K, O> OrderLookup for HashMap<K, O>
where
    K: Id,
    O: Order<Id = K>,
{
    type Order = O;

    fn order(&self, id: &K) -> Option<&O> {
        self.get(id)
    }
}

impl<K, O> OrderLookup for BTreeMap<K, O>
where
    K: Id + Ord,
    O: Order<Id = K>,
{
    type Order = O;

    fn order(&self, id: &K) -> Option<&O> {
        self.get(id)
    }
}

/// External routing service computing one chunk at a time.
///
/// Calls are treated as atomic: a chunk either yields its legs and summary
/// or fails as a whole.
pub trait RouteProvider: Send + Sync {
    fn compute_route(&self, chunk: &Chunk, options: &RouteOptions)
    -> Result<ChunkRoute, ProviderError>;
}

impl<P> RouteProvider for &P
where
    P: RouteProvider + ?Sized,
{
    fn compute_route(
        &self,
        chunk: &Chunk,
        options: &RouteOptions,
    ) -> Result<ChunkRoute, ProviderError> {
        (**self).compute_route(chunk, options)
    }
}
