//! Route types.

use crate::domain::CityName;

/// A directed route from one city to another with a travel time.
///
/// Routes are stored per-city, so an undirected road between two cities
/// is represented as a pair of `Route` values, one in each direction.
/// Required trips are also `Route` values: a trip must be ridden in
/// exactly the direction it names.
///
/// # Examples
///
/// ```
/// use trip_planner::domain::{CityName, Route};
///
/// let london = CityName::parse("London").unwrap();
/// let paris = CityName::parse("Paris").unwrap();
/// let route = Route::new(london.clone(), paris.clone(), 90);
///
/// assert!(route.joins(&london, &paris));
/// // Direction matters
/// assert!(!route.joins(&paris, &london));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    from: CityName,
    to: CityName,
    minutes: u32,
}

impl Route {
    /// Create a route from `from` to `to` taking `minutes`.
    pub fn new(from: CityName, to: CityName, minutes: u32) -> Self {
        Route { from, to, minutes }
    }

    /// The city this route starts from.
    pub fn from(&self) -> &CityName {
        &self.from
    }

    /// The city this route arrives at.
    pub fn to(&self) -> &CityName {
        &self.to
    }

    /// Travel time in minutes, excluding any transfer time.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Whether this route runs from `from` to `to`, in that direction.
    pub fn joins(&self, from: &CityName, to: &CityName) -> bool {
        &self.from == from && &self.to == to
    }
}
