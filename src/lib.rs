//! Train Simulation Library
//!
//! Simulates a single train on a procedurally generated route and searches
//! for routes a given train can complete.

pub mod simulation;
