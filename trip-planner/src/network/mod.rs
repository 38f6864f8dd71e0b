//! The city network: cities, the roads between them, and required trips.
//!
//! A network is assembled with [`NetworkBuilder`] and then frozen into a
//! [`TripNetwork`]. All mutation happens through the builder; once built,
//! the network only hands out shared references, so routes recorded
//! against it stay valid for its whole lifetime.

use std::collections::HashMap;

use crate::domain::{CityName, Route};

/// Errors from constructing or querying a city network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The named city has not been declared.
    #[error("unknown city `{0}`")]
    UnknownCity(CityName),

    /// A city with this name has already been declared.
    #[error("city `{0}` is already declared")]
    DuplicateCity(CityName),

    /// Roads must join two distinct cities.
    #[error("cannot connect city `{0}` to itself")]
    SelfConnection(CityName),

    /// No road directly joins the two cities.
    #[error("no route from `{from}` to `{to}`")]
    NoSuchRoute { from: CityName, to: CityName },

    /// A required trip must leave its starting city.
    #[error("trip from `{0}` to itself is not allowed")]
    SelfReferentialTrip(CityName),
}

/// A city in the network: its name, its transfer time, and the routes
/// leaving it.
///
/// The transfer time is the delay paid for changing connections in this
/// city. It is charged whenever a journey arrives here, and refunded at
/// the journey's two ends when the net cost is reported.
#[derive(Debug, Clone)]
pub struct City {
    name: CityName,
    transfer_minutes: u32,
    connections: Vec<Route>,
}

impl City {
    fn new(name: CityName, transfer_minutes: u32) -> Self {
        City {
            name,
            transfer_minutes,
            connections: Vec::new(),
        }
    }

    /// The city's name.
    pub fn name(&self) -> &CityName {
        &self.name
    }

    /// Transfer time in minutes for changing connections here.
    pub fn transfer_minutes(&self) -> u32 {
        self.transfer_minutes
    }

    /// Routes leaving this city, in the order they were declared.
    pub fn connections(&self) -> &[Route] {
        &self.connections
    }

    /// The first declared route from this city to `to`, if any.
    ///
    /// Parallel routes between the same pair are allowed; the earliest
    /// declaration wins.
    pub fn route_to(&self, to: &CityName) -> Option<&Route> {
        self.connections.iter().find(|route| route.to() == to)
    }
}

/// Builder for assembling a [`TripNetwork`].
///
/// # Examples
///
/// ```
/// use trip_planner::domain::CityName;
/// use trip_planner::network::NetworkBuilder;
///
/// let london = CityName::parse("London").unwrap();
/// let paris = CityName::parse("Paris").unwrap();
///
/// let mut builder = NetworkBuilder::new();
/// builder.add_city(london.clone(), 30).unwrap();
/// builder.add_city(paris.clone(), 120).unwrap();
/// builder.connect(&london, &paris, 90).unwrap();
///
/// let trip = builder.required_trip(&london, &paris).unwrap();
/// assert_eq!(trip.minutes(), 90);
///
/// let network = builder.build();
/// assert_eq!(network.city_count(), 2);
/// assert_eq!(network.route_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    cities: HashMap<CityName, City>,
}

impl NetworkBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a city with its transfer time.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::DuplicateCity`] if the name is already taken.
    pub fn add_city(&mut self, name: CityName, transfer_minutes: u32) -> Result<(), NetworkError> {
        if self.cities.contains_key(&name) {
            return Err(NetworkError::DuplicateCity(name));
        }
        self.cities
            .insert(name.clone(), City::new(name, transfer_minutes));
        Ok(())
    }

    /// Connect two declared cities with a road taking `minutes`.
    ///
    /// The road is undirected: a route is recorded in each direction with
    /// the same travel time. Calling this again for the same pair adds a
    /// parallel road rather than replacing the first.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::UnknownCity`] if either city is undeclared,
    /// or [`NetworkError::SelfConnection`] if `a` and `b` are the same.
    pub fn connect(&mut self, a: &CityName, b: &CityName, minutes: u32) -> Result<(), NetworkError> {
        if a == b {
            return Err(NetworkError::SelfConnection(a.clone()));
        }
        for name in [a, b] {
            if !self.cities.contains_key(name) {
                return Err(NetworkError::UnknownCity(name.clone()));
            }
        }

        // Safe: both cities checked present above
        self.cities
            .get_mut(a)
            .unwrap()
            .connections
            .push(Route::new(a.clone(), b.clone(), minutes));
        self.cities
            .get_mut(b)
            .unwrap()
            .connections
            .push(Route::new(b.clone(), a.clone(), minutes));
        Ok(())
    }

    /// Record a required trip from `from` to `to`.
    ///
    /// The returned [`Route`] is a snapshot of the first matching road as
    /// it exists right now; roads connected later do not affect it.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::SelfReferentialTrip`] if `from` and `to`
    /// are the same, or [`NetworkError::NoSuchRoute`] if no declared road
    /// joins them. An undeclared city has no roads, so naming one here is
    /// also reported as [`NetworkError::NoSuchRoute`].
    pub fn required_trip(&self, from: &CityName, to: &CityName) -> Result<Route, NetworkError> {
        if from == to {
            return Err(NetworkError::SelfReferentialTrip(from.clone()));
        }
        self.cities
            .get(from)
            .and_then(|city| city.route_to(to))
            .cloned()
            .ok_or_else(|| NetworkError::NoSuchRoute {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Freeze the builder into an immutable network.
    pub fn build(self) -> TripNetwork {
        TripNetwork {
            cities: self.cities,
        }
    }
}

/// An immutable network of cities and the roads between them.
///
/// Built with [`NetworkBuilder`]; offers lookups only.
#[derive(Debug, Clone)]
pub struct TripNetwork {
    cities: HashMap<CityName, City>,
}

impl TripNetwork {
    /// Look up a city by name.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::UnknownCity`] if the city is undeclared.
    pub fn city(&self, name: &CityName) -> Result<&City, NetworkError> {
        self.cities
            .get(name)
            .ok_or_else(|| NetworkError::UnknownCity(name.clone()))
    }

    /// Find the first declared route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::UnknownCity`] if `from` is undeclared, or
    /// [`NetworkError::NoSuchRoute`] if no road joins the pair.
    pub fn find_route(&self, from: &CityName, to: &CityName) -> Result<&Route, NetworkError> {
        self.city(from)?
            .route_to(to)
            .ok_or_else(|| NetworkError::NoSuchRoute {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Number of declared cities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Number of roads (counting A→B and B→A as one).
    pub fn route_count(&self) -> usize {
        self.cities
            .values()
            .map(|city| city.connections.len())
            .sum::<usize>()
            / 2
    }

    /// Returns true if no cities are declared.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
