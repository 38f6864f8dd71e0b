//! Best-first journey search.
//!
//! Finds the cheapest walk through the network that rides every required
//! trip in its stated direction, charging travel time plus per-city
//! transfer times along the way. Cities may be visited any number of
//! times, so the search keeps a priority frontier rather than a visited
//! set and leans on its cost lower bound to stay focused.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::domain::{CityName, Route};
use crate::network::TripNetwork;

use super::config::SearchConfig;
use super::state::{SearchState, StateArena, StateId};

/// Error from journey search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The starting city is not in the network.
    #[error("unknown start city `{0}`")]
    UnknownStart(CityName),

    /// Every reachable state was expanded without riding all the trips.
    #[error("search space exhausted with {outstanding} required trips still to ride")]
    Exhausted { outstanding: usize },

    /// The expansion cap was hit before a journey was found.
    #[error("search aborted after exceeding {limit} expansions")]
    Aborted { limit: usize },
}

/// Frontier entry ordering the heap by lowest estimated journey time.
///
/// `BinaryHeap` is a max-heap, so comparisons are reversed. Entries with
/// equal estimates pop in insertion order, which keeps expansion counts
/// reproducible run to run.
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    /// Cost so far plus the lower bound on the cost still to come.
    priority: u64,

    /// Insertion counter, for first-in-first-out tie-breaking.
    seq: u64,

    state: StateId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a successful journey search.
///
/// Keeps the whole state tree alive, so the winning path can be walked
/// back from the terminal state and inspected.
#[derive(Debug)]
pub struct SearchOutcome<'net> {
    arena: StateArena<'net>,
    terminal: StateId,
    expansions: usize,
    net_cost: u64,
}

impl<'net> SearchOutcome<'net> {
    /// The goal state: every required trip ridden.
    pub fn terminal(&self) -> &SearchState<'net> {
        &self.arena[self.terminal]
    }

    /// Handle of the goal state.
    pub fn terminal_id(&self) -> StateId {
        self.terminal
    }

    /// Look up any state created during the search.
    pub fn state(&self, id: StateId) -> &SearchState<'net> {
        &self.arena[id]
    }

    /// Number of states popped from the frontier.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Number of states created during the search.
    pub fn states_created(&self) -> usize {
        self.arena.len()
    }

    /// Journey cost with the transfer times of the two end cities
    /// refunded: travel time plus the transfer times of intermediate
    /// stops only.
    pub fn net_cost(&self) -> u64 {
        self.net_cost
    }

    /// Total minutes accumulated by the goal state, transfer times of
    /// the two end cities included.
    pub fn total_minutes(&self) -> u64 {
        self.terminal().total_minutes()
    }

    /// The cities of the winning journey, start first.
    pub fn path(&self) -> Vec<&'net CityName> {
        let mut names = Vec::new();
        let mut cursor = Some(self.terminal);
        while let Some(id) = cursor {
            let state = &self.arena[id];
            names.push(state.name());
            cursor = state.parent();
        }
        names.reverse();
        names
    }
}

/// Journey planner using best-first search.
pub struct Planner<'a> {
    network: &'a TripNetwork,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a TripNetwork, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Find the cheapest journey from `start` that rides every one of
    /// `required_trips` in its stated direction.
    ///
    /// A trip counts as ridden when the journey traverses a road from
    /// the trip's origin directly to its destination; duplicated trips
    /// must be ridden once per occurrence. The search only ever steps
    /// towards cities that are endpoints of outstanding trips, and it
    /// charges every arrival the city's transfer time.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownStart`] for an undeclared starting
    /// city, [`SearchError::Exhausted`] when no journey can ride all the
    /// trips, or [`SearchError::Aborted`] when the configured expansion
    /// cap is exceeded first.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_planner::domain::CityName;
    /// use trip_planner::network::NetworkBuilder;
    /// use trip_planner::planner::{Planner, SearchConfig};
    ///
    /// let york = CityName::parse("York").unwrap();
    /// let leeds = CityName::parse("Leeds").unwrap();
    ///
    /// let mut builder = NetworkBuilder::new();
    /// builder.add_city(york.clone(), 10).unwrap();
    /// builder.add_city(leeds.clone(), 20).unwrap();
    /// builder.connect(&york, &leeds, 25).unwrap();
    /// let trip = builder.required_trip(&york, &leeds).unwrap();
    /// let network = builder.build();
    ///
    /// let config = SearchConfig::default();
    /// let planner = Planner::new(&network, &config);
    /// let outcome = planner.find_optimal_journey(&york, &[trip]).unwrap();
    ///
    /// assert_eq!(outcome.net_cost(), 25);
    /// assert_eq!(outcome.expansions(), 2);
    /// ```
    pub fn find_optimal_journey(
        &self,
        start: &CityName,
        required_trips: &[Route],
    ) -> Result<SearchOutcome<'a>, SearchError> {
        let start_city = self
            .network
            .city(start)
            .map_err(|_| SearchError::UnknownStart(start.clone()))?;
        let start_transfer = u64::from(start_city.transfer_minutes());

        let mut arena = StateArena::new();
        let mut frontier = BinaryHeap::new();
        let mut seq: u64 = 0;

        let root = SearchState::start_at(start_city, required_trips);
        let priority = root.total_minutes() + root.heuristic(None);
        let mut current = arena.push(root);
        frontier.push(FrontierEntry {
            priority,
            seq,
            state: current,
        });
        seq += 1;

        let mut expansions: usize = 0;

        while !arena[current].is_goal() {
            let entry = frontier.pop().ok_or_else(|| SearchError::Exhausted {
                outstanding: arena[current].remaining_trips().len(),
            })?;
            current = entry.state;
            expansions += 1;

            if let Some(limit) = self.config.max_expansions {
                if expansions > limit {
                    return Err(SearchError::Aborted { limit });
                }
            }

            // Arriving here may have ridden an outstanding trip; settle
            // that before deciding where to go next.
            if let Some(parent) = arena[current].parent() {
                let arrived_from = arena[parent].name();
                if let Some(trip) = arena[current].complete_trip(arrived_from) {
                    trace!(from = %trip.from(), to = %trip.to(), "required trip ridden");
                }
            }

            let city = arena[current].city();
            trace!(
                city = %city.name(),
                total_minutes = arena[current].total_minutes(),
                outstanding = arena[current].remaining_trips().len(),
                frontier = frontier.len(),
                "expanding state"
            );

            for route in city.connections() {
                // Only step towards cities some outstanding trip touches
                if !arena[current].must_visit(route.to()) {
                    continue;
                }

                // Safe: connect() only records routes between declared cities
                let next_city = self.network.city(route.to()).unwrap();
                let child = SearchState::via(current, &arena[current], next_city, route.minutes());
                let priority = child.total_minutes() + child.heuristic(Some(city.name()));
                let id = arena.push(child);
                frontier.push(FrontierEntry {
                    priority,
                    seq,
                    state: id,
                });
                seq += 1;
            }
        }

        let terminal = &arena[current];
        let terminal_transfer = u64::from(terminal.city().transfer_minutes());
        let net_cost = terminal
            .total_minutes()
            .saturating_sub(start_transfer)
            .saturating_sub(terminal_transfer);

        debug!(
            expansions,
            states = arena.len(),
            net_cost,
            "journey search complete"
        );

        Ok(SearchOutcome {
            arena,
            terminal: current,
            expansions,
            net_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkBuilder;

    fn city(name: &str) -> CityName {
        CityName::parse(name).unwrap()
    }

    fn trip(from: &str, to: &str, minutes: u32) -> Route {
        Route::new(city(from), city(to), minutes)
    }

    fn network(cities: &[(&str, u32)], roads: &[(&str, &str, u32)]) -> TripNetwork {
        let mut builder = NetworkBuilder::new();
        for (name, transfer) in cities {
            builder.add_city(city(name), *transfer).unwrap();
        }
        for (a, b, minutes) in roads {
            builder.connect(&city(a), &city(b), *minutes).unwrap();
        }
        builder.build()
    }

    fn path_names(outcome: &SearchOutcome<'_>) -> Vec<String> {
        outcome
            .path()
            .iter()
            .map(|name| name.as_str().to_owned())
            .collect()
    }

    #[test]
    fn rides_the_direct_road_when_the_detour_city_is_not_required() {
        let network = network(
            &[("A", 0), ("B", 0), ("C", 0)],
            &[("A", "B", 5), ("B", "C", 3), ("A", "C", 10)],
        );
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("A", "C", 10)])
            .unwrap();

        // B is not an endpoint of any required trip, so the detour
        // through it is never taken even though it would be cheaper
        assert_eq!(outcome.net_cost(), 10);
        assert_eq!(outcome.expansions(), 2);
        assert_eq!(path_names(&outcome), ["A", "C"]);
    }

    #[test]
    fn chains_required_trips_through_their_shared_city() {
        let network = network(
            &[("A", 0), ("B", 0), ("C", 0)],
            &[("A", "B", 2), ("B", "C", 4), ("A", "C", 1)],
        );
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("A", "B", 2), trip("B", "C", 4)])
            .unwrap();

        // The A-C shortcut rides nothing, so the trips are chained
        assert_eq!(outcome.net_cost(), 6);
        assert_eq!(outcome.expansions(), 3);
        assert_eq!(path_names(&outcome), ["A", "B", "C"]);
    }

    #[test]
    fn travels_to_a_required_trip_before_riding_it() {
        let network = network(
            &[("A", 0), ("D", 0), ("E", 0)],
            &[("A", "D", 3), ("A", "E", 7), ("D", "E", 2)],
        );
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("D", "E", 2)])
            .unwrap();

        // Reaching E directly from A rides nothing; the journey must
        // first reach D and then ride D→E
        assert_eq!(outcome.net_cost(), 5);
        assert_eq!(outcome.expansions(), 3);
        assert_eq!(path_names(&outcome), ["A", "D", "E"]);
    }

    #[test]
    fn charges_intermediate_transfers_but_refunds_the_ends() {
        let network = network(
            &[("A", 5), ("B", 7), ("C", 9)],
            &[("A", "B", 2), ("B", "C", 3)],
        );
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("A", "B", 2), trip("B", "C", 3)])
            .unwrap();

        // Travel 2 + 3 plus the stopover in B; A and C are refunded
        assert_eq!(outcome.net_cost(), 12);
        assert_eq!(outcome.total_minutes(), 26);
        assert_eq!(outcome.expansions(), 3);
    }

    #[test]
    fn revisits_cities_when_the_trips_require_it() {
        let network = network(&[("A", 0), ("B", 2), ("C", 0)], &[("A", "B", 1), ("B", "C", 1)]);
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("B", "A", 1), trip("B", "C", 1)])
            .unwrap();

        // Both trips leave B, so B is passed through twice and its
        // transfer time is paid both times
        assert_eq!(outcome.net_cost(), 8);
        assert_eq!(outcome.expansions(), 7);
        assert_eq!(path_names(&outcome), ["A", "B", "A", "B", "C"]);
    }

    #[test]
    fn rides_a_duplicated_trip_once_per_occurrence() {
        let network = network(&[("A", 0), ("B", 0)], &[("A", "B", 1)]);
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("A", "B", 1), trip("A", "B", 1)])
            .unwrap();

        assert_eq!(outcome.net_cost(), 3);
        assert_eq!(outcome.expansions(), 4);
        assert_eq!(path_names(&outcome), ["A", "B", "A", "B"]);
    }

    #[test]
    fn completes_immediately_with_no_required_trips() {
        let network = network(&[("A", 5), ("B", 0)], &[("A", "B", 1)]);
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let outcome = planner.find_optimal_journey(&city("A"), &[]).unwrap();

        assert_eq!(outcome.expansions(), 0);
        assert_eq!(outcome.net_cost(), 0);
        assert_eq!(path_names(&outcome), ["A"]);
        assert!(outcome.terminal().is_goal());
    }

    #[test]
    fn fails_when_a_required_trip_is_unreachable() {
        let network = network(&[("A", 0), ("X", 0), ("Y", 0)], &[("X", "Y", 1)]);
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let err = planner
            .find_optimal_journey(&city("A"), &[trip("X", "Y", 1)])
            .unwrap_err();

        assert_eq!(err, SearchError::Exhausted { outstanding: 1 });
    }

    #[test]
    fn aborts_at_the_expansion_cap() {
        let network = network(&[("A", 0), ("B", 2), ("C", 0)], &[("A", "B", 1), ("B", "C", 1)]);
        let config = SearchConfig::new(Some(3));
        let planner = Planner::new(&network, &config);

        let err = planner
            .find_optimal_journey(&city("A"), &[trip("B", "A", 1), trip("B", "C", 1)])
            .unwrap_err();

        assert_eq!(err, SearchError::Aborted { limit: 3 });
    }

    #[test]
    fn aborts_when_bouncing_between_trips_that_cannot_chain() {
        // Riding either trip strands the journey, so no walk completes
        // both; meanwhile the A-C road lets the search bounce between
        // the trips' endpoints without ever discharging one. The
        // frontier never drains, and only the cap ends the search.
        let network = network(
            &[("A", 0), ("B", 0), ("C", 0), ("D", 0)],
            &[("A", "B", 1), ("C", "D", 1), ("A", "C", 1)],
        );
        let config = SearchConfig::new(Some(100));
        let planner = Planner::new(&network, &config);

        let err = planner
            .find_optimal_journey(&city("A"), &[trip("A", "B", 1), trip("C", "D", 1)])
            .unwrap_err();

        assert_eq!(err, SearchError::Aborted { limit: 100 });
    }

    #[test]
    fn rejects_an_unknown_starting_city() {
        let network = network(&[("A", 0)], &[]);
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let err = planner
            .find_optimal_journey(&city("Z"), &[])
            .unwrap_err();

        assert_eq!(err, SearchError::UnknownStart(city("Z")));
    }

    #[test]
    fn repeated_searches_expand_identically() {
        let network = network(&[("A", 0), ("B", 2), ("C", 0)], &[("A", "B", 1), ("B", "C", 1)]);
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);
        let trips = [trip("B", "A", 1), trip("B", "C", 1)];

        let first = planner.find_optimal_journey(&city("A"), &trips).unwrap();
        let second = planner.find_optimal_journey(&city("A"), &trips).unwrap();

        assert_eq!(first.expansions(), second.expansions());
        assert_eq!(first.net_cost(), second.net_cost());
        assert_eq!(path_names(&first), path_names(&second));
    }

    #[test]
    fn terminal_keeps_the_whole_state_tree_reachable() {
        let network = network(&[("A", 0), ("B", 0)], &[("A", "B", 4)]);
        let config = SearchConfig::default();
        let planner = Planner::new(&network, &config);

        let outcome = planner
            .find_optimal_journey(&city("A"), &[trip("A", "B", 4)])
            .unwrap();

        let terminal = outcome.terminal();
        assert!(terminal.is_goal());
        let root = outcome.state(terminal.parent().unwrap());
        assert_eq!(root.name(), &city("A"));
        assert!(root.parent().is_none());
        assert!(outcome.states_created() >= 2);
    }
}
