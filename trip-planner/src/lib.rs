//! Trip planner over a weighted city network.
//!
//! Answers: "starting from this city, what is the cheapest journey
//! that rides every required trip?" Plans are loaded from simple text
//! files and searched with a best-first strategy.

pub mod domain;
pub mod input;
pub mod network;
pub mod planner;
pub mod report;
