//! Serializable report types.

use serde::Serialize;

use super::{Hop, Itinerary};

/// A finished journey as a machine-readable report.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    /// Number of states expanded during the search
    pub nodes_expanded: usize,

    /// Journey cost with the end cities' transfer times refunded
    pub cost: u64,

    /// The hops of the journey, in travel order
    pub trips: Vec<HopReport>,
}

/// One hop of a reported journey.
#[derive(Debug, Serialize)]
pub struct HopReport {
    /// City the hop leaves
    pub from: String,

    /// City the hop arrives at
    pub to: String,

    /// Travel minutes for the hop
    pub minutes: u64,
}

impl PlanReport {
    /// Create from an itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            nodes_expanded: itinerary.expansions(),
            cost: itinerary.net_cost(),
            trips: itinerary.hops().iter().map(HopReport::from_hop).collect(),
        }
    }
}

impl HopReport {
    /// Create from a hop.
    pub fn from_hop(hop: &Hop) -> Self {
        Self {
            from: hop.from().as_str().to_string(),
            to: hop.to().as_str().to_string(),
            minutes: hop.minutes(),
        }
    }
}
