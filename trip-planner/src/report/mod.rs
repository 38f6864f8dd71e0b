//! Journey reporting.
//!
//! Turns a search outcome into a printable itinerary: the expansion
//! count, the net journey cost, and one line per hop of the winning
//! journey.

use std::fmt;

use crate::domain::CityName;
use crate::planner::SearchOutcome;

mod dto;

pub use dto::{HopReport, PlanReport};

/// One hop of the winning journey: a road ridden from one city to the
/// next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    from: CityName,
    to: CityName,
    minutes: u64,
}

impl Hop {
    /// City the hop leaves.
    pub fn from(&self) -> &CityName {
        &self.from
    }

    /// City the hop arrives at.
    pub fn to(&self) -> &CityName {
        &self.to
    }

    /// Travel minutes for the hop, excluding transfer time.
    pub fn minutes(&self) -> u64 {
        self.minutes
    }
}

/// A finished journey in presentation order.
///
/// Formats as the classic plan summary:
///
/// ```text
/// 3 nodes expanded
/// cost = 12
/// Trip London to Paris
/// Trip Paris to Berlin
/// ```
#[derive(Debug, Clone)]
pub struct Itinerary {
    hops: Vec<Hop>,
    expansions: usize,
    net_cost: u64,
}

impl Itinerary {
    /// Build the itinerary for a search outcome by walking the winning
    /// path back from the terminal state.
    pub fn from_outcome(outcome: &SearchOutcome<'_>) -> Self {
        let mut chain = Vec::new();
        let mut cursor = Some(outcome.terminal_id());
        while let Some(id) = cursor {
            chain.push(id);
            cursor = outcome.state(id).parent();
        }
        chain.reverse();

        let hops = chain
            .windows(2)
            .map(|pair| {
                let parent = outcome.state(pair[0]);
                let child = outcome.state(pair[1]);
                Hop {
                    from: parent.name().clone(),
                    to: child.name().clone(),
                    // The step cost minus the arrival transfer is the
                    // road's travel time
                    minutes: child.total_minutes()
                        - parent.total_minutes()
                        - u64::from(child.city().transfer_minutes()),
                }
            })
            .collect();

        Self {
            hops,
            expansions: outcome.expansions(),
            net_cost: outcome.net_cost(),
        }
    }

    /// The hops of the journey, in travel order. Empty when the journey
    /// never leaves the starting city.
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Number of states expanded to find this journey.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Journey cost with the end cities' transfer times refunded.
    pub fn net_cost(&self) -> u64 {
        self.net_cost
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} nodes expanded", self.expansions)?;
        writeln!(f, "cost = {}", self.net_cost)?;
        for hop in &self.hops {
            writeln!(f, "Trip {} to {}", hop.from, hop.to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Route;
    use crate::network::{NetworkBuilder, TripNetwork};
    use crate::planner::{Planner, SearchConfig};

    fn city(name: &str) -> CityName {
        CityName::parse(name).unwrap()
    }

    fn trip(from: &str, to: &str, minutes: u32) -> Route {
        Route::new(city(from), city(to), minutes)
    }

    /// A - B - C in a line with transfer times 5, 7, 9.
    fn network() -> TripNetwork {
        let mut builder = NetworkBuilder::new();
        builder.add_city(city("A"), 5).unwrap();
        builder.add_city(city("B"), 7).unwrap();
        builder.add_city(city("C"), 9).unwrap();
        builder.connect(&city("A"), &city("B"), 2).unwrap();
        builder.connect(&city("B"), &city("C"), 3).unwrap();
        builder.build()
    }

    #[test]
    fn lists_hops_in_travel_order() {
        let network = network();
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);
        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("A", "B", 2), trip("B", "C", 3)])
            .unwrap();

        let itinerary = Itinerary::from_outcome(&outcome);

        assert_eq!(itinerary.expansions(), 3);
        assert_eq!(itinerary.net_cost(), 12);
        assert_eq!(itinerary.hops().len(), 2);

        let first = &itinerary.hops()[0];
        assert_eq!(first.from(), &city("A"));
        assert_eq!(first.to(), &city("B"));
        assert_eq!(first.minutes(), 2);

        let second = &itinerary.hops()[1];
        assert_eq!(second.from(), &city("B"));
        assert_eq!(second.to(), &city("C"));
        assert_eq!(second.minutes(), 3);
    }

    #[test]
    fn display_matches_the_classic_format() {
        let network = network();
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);
        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("A", "B", 2), trip("B", "C", 3)])
            .unwrap();

        let itinerary = Itinerary::from_outcome(&outcome);

        assert_eq!(
            itinerary.to_string(),
            "3 nodes expanded\ncost = 12\nTrip A to B\nTrip B to C\n"
        );
    }

    #[test]
    fn stationary_journey_has_no_hops() {
        let network = network();
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);
        let outcome = planner.find_optimal_journey(&city("A"), &[]).unwrap();

        let itinerary = Itinerary::from_outcome(&outcome);

        assert!(itinerary.hops().is_empty());
        assert_eq!(itinerary.to_string(), "0 nodes expanded\ncost = 0\n");
    }

    #[test]
    fn revisited_cities_appear_once_per_visit() {
        let mut builder = NetworkBuilder::new();
        builder.add_city(city("A"), 0).unwrap();
        builder.add_city(city("B"), 0).unwrap();
        builder.connect(&city("A"), &city("B"), 1).unwrap();
        let network = builder.build();

        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);
        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("A", "B", 1), trip("A", "B", 1)])
            .unwrap();

        let itinerary = Itinerary::from_outcome(&outcome);
        let legs: Vec<String> = itinerary
            .hops()
            .iter()
            .map(|hop| format!("{}-{}", hop.from(), hop.to()))
            .collect();
        assert_eq!(legs, ["A-B", "B-A", "A-B"]);
    }
}
