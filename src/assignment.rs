//! Upstream assignment records produced by the optimization engine.

use serde::{Deserialize, Serialize};

/// One stop in an assignment, in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedStop<I> {
    pub id: I,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

impl<I> AssignedStop<I> {
    pub fn new(id: I) -> Self {
        Self {
            id,
            arrival_time: None,
        }
    }
}

/// Ordered stops allocated to one vehicle (or virtual vehicle group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment<I> {
    pub fleet_id: String,
    pub orders: Vec<AssignedStop<I>>,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_group_id: Option<String>,
}

/// Record whose `backToOrigin` flag governs the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOwner<'a> {
    Fleet(&'a str),
    VirtualGroup(&'a str),
}

impl<I> Assignment<I> {
    /// Assignment for `fleet_id` visiting `stops` in order, without arrival times.
    pub fn new(fleet_id: impl Into<String>, stops: impl IntoIterator<Item = I>) -> Self {
        Self {
            fleet_id: fleet_id.into(),
            orders: stops.into_iter().map(AssignedStop::new).collect(),
            is_virtual: false,
            virtual_group_id: None,
        }
    }

    /// Order ids in visiting order.
    pub fn stop_ids(&self) -> impl Iterator<Item = &I> {
        self.orders.iter().map(|stop| &stop.id)
    }

    /// Virtual assignments defer to their group; a virtual assignment
    /// without a group id falls back to the fleet.
    pub fn route_owner(&self) -> RouteOwner<'_> {
        match (self.is_virtual, self.virtual_group_id.as_deref()) {
            (true, Some(group_id)) => RouteOwner::VirtualGroup(group_id),
            _ => RouteOwner::Fleet(&self.fleet_id),
        }
    }
}

/// Resolves the tri-state `backToOrigin` flag. Unset means route back.
pub fn routes_back(back_to_origin: Option<bool>) -> bool {
    back_to_origin.unwrap_or(true)
}
