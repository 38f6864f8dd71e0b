//! Journey planner using best-first search.
//!
//! This module implements the core planning algorithm that answers:
//! "starting from this city, what is the cheapest journey that rides
//! every required trip?"
//!
//! The algorithm expands the cheapest-looking state first, guided by a
//! lower bound built from the travel times of the trips still to ride.

mod config;
mod search;
mod state;

pub use config::SearchConfig;
pub use search::{Planner, SearchError, SearchOutcome};
pub use state::{SearchState, StateId};
