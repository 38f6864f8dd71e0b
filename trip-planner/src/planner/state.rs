//! Search states and the arena that owns them.
//!
//! Every expansion appends states to a [`StateArena`] and records the
//! parent as a [`StateId`] rather than a reference, so the tree can keep
//! growing while earlier states stay addressable. States borrow their
//! city from the network, which outlives any search.

use std::ops::{Index, IndexMut};

use crate::domain::{CityName, Route};
use crate::network::City;

/// Handle to a state created during one search.
///
/// Handles are only meaningful to the search that minted them; resolve
/// them through that search's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateId(usize);

/// Owns every state created during one search.
///
/// States are never removed; a handle obtained from [`StateArena::push`]
/// stays valid for the arena's lifetime.
#[derive(Debug, Default)]
pub(crate) struct StateArena<'net> {
    states: Vec<SearchState<'net>>,
}

impl<'net> StateArena<'net> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Store a state and return its handle.
    pub fn push(&mut self, state: SearchState<'net>) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(state);
        id
    }

    /// Number of states created so far.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no states have been created.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<'net> Index<StateId> for StateArena<'net> {
    type Output = SearchState<'net>;

    fn index(&self, id: StateId) -> &Self::Output {
        &self.states[id.0]
    }
}

impl<'net> IndexMut<StateId> for StateArena<'net> {
    fn index_mut(&mut self, id: StateId) -> &mut Self::Output {
        &mut self.states[id.0]
    }
}

/// One node in the search tree: a city reached along some path, the cost
/// paid to get there, and the required trips still outstanding.
#[derive(Debug, Clone)]
pub struct SearchState<'net> {
    /// The city this state sits in.
    city: &'net City,

    /// The state this one was expanded from, if any.
    parent: Option<StateId>,

    /// Total minutes accumulated along the path, including the transfer
    /// time of every city visited (the starting city's too).
    total_minutes: u64,

    /// Required trips not yet ridden along this path.
    remaining_trips: Vec<Route>,
}

impl<'net> SearchState<'net> {
    /// The root state: the journey begins at `city` with every required
    /// trip outstanding.
    pub fn start_at(city: &'net City, required_trips: &[Route]) -> Self {
        SearchState {
            city,
            parent: None,
            total_minutes: u64::from(city.transfer_minutes()),
            remaining_trips: required_trips.to_vec(),
        }
    }

    /// A state reached by travelling from `parent_state` to `city` in
    /// `travel_minutes`. The arrival pays `city`'s transfer time on top
    /// of the travel time.
    pub fn via(
        parent: StateId,
        parent_state: &SearchState<'net>,
        city: &'net City,
        travel_minutes: u32,
    ) -> Self {
        SearchState {
            city,
            parent: Some(parent),
            total_minutes: parent_state.total_minutes
                + u64::from(travel_minutes)
                + u64::from(city.transfer_minutes()),
            remaining_trips: parent_state.remaining_trips.clone(),
        }
    }

    /// The city this state sits in.
    pub fn city(&self) -> &'net City {
        self.city
    }

    /// The name of the city this state sits in.
    pub fn name(&self) -> &'net CityName {
        self.city.name()
    }

    /// The state this one was expanded from, if any.
    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// Total minutes accumulated along the path so far.
    pub fn total_minutes(&self) -> u64 {
        self.total_minutes
    }

    /// Required trips not yet ridden along this path.
    pub fn remaining_trips(&self) -> &[Route] {
        &self.remaining_trips
    }

    /// Returns true once every required trip has been ridden.
    pub fn is_goal(&self) -> bool {
        self.remaining_trips.is_empty()
    }

    /// Mark one required trip as ridden, if arriving here from
    /// `arrived_from` completed one.
    ///
    /// Only the first outstanding trip running `arrived_from` → here is
    /// taken, in declaration order; a duplicated trip must be ridden once
    /// per occurrence. Direction matters: arriving at the trip's origin
    /// from its destination completes nothing.
    pub fn complete_trip(&mut self, arrived_from: &CityName) -> Option<Route> {
        let pos = self
            .remaining_trips
            .iter()
            .position(|trip| trip.joins(arrived_from, self.city.name()))?;
        Some(self.remaining_trips.remove(pos))
    }

    /// Whether `city` is an endpoint of any outstanding trip.
    ///
    /// The search only ever moves towards such cities.
    pub fn must_visit(&self, city: &CityName) -> bool {
        self.remaining_trips
            .iter()
            .any(|trip| trip.from() == city || trip.to() == city)
    }

    /// Lower bound on the minutes still needed to finish the journey:
    /// the combined travel time of every outstanding trip.
    ///
    /// When this state was reached from `arrived_from` and that arrival
    /// completes an outstanding trip, that trip's time is already paid
    /// for, so the first such trip is discounted.
    pub fn heuristic(&self, arrived_from: Option<&CityName>) -> u64 {
        let outstanding: u64 = self
            .remaining_trips
            .iter()
            .map(|trip| u64::from(trip.minutes()))
            .sum();

        if let Some(from) = arrived_from {
            if let Some(trip) = self
                .remaining_trips
                .iter()
                .find(|trip| trip.joins(from, self.city.name()))
            {
                return outstanding - u64::from(trip.minutes());
            }
        }

        outstanding
    }
}
