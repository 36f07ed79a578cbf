//! Standalone train simulation module
//!
//! This module contains the route model, the train transition function and
//! the route search. It has no rendering or input handling and can be driven
//! headless from the console or from tests.

mod route;
mod route_generator;
mod run_stats;
mod train;
mod types;
mod validator;
mod world;

pub use route::{Route, RouteError, SegmentLocation};
pub use route_generator::{synthesize, GeneratorConfig};
pub use run_stats::RunStats;
pub use train::{step, Failure, StepOutcome, Train};
pub use types::{
    Segment, SegmentKind, DEFAULT_DELTA_T, DEFAULT_MAX_TIME, DEFAULT_SEGMENT_COUNT,
    DEFAULT_TRAIN_MASS, DEFAULT_TRAIN_MAX_FORCE,
};
pub use validator::{
    find_feasible_route, search_feasible_route, validate, FeasibleRoute, SearchConfig,
    SearchError, ValidationError,
};
pub use world::{SimWorld, MAP_WIDTH};
