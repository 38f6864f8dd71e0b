//! Domain types for the trip planner.
//!
//! This module contains the core domain model types that represent
//! validated plan data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod city;
mod route;

pub use city::{CityName, InvalidCityName};
pub use route::Route;
