//! Headless route validation and the generate-and-test search
//!
//! [`validate`] dry-runs a train over a route. The search functions keep
//! synthesizing routes from increasing seeds until one validates.

use std::time::{Duration, Instant};

use log::{debug, error, info};
use thiserror::Error;

use super::route::{Route, RouteError};
use super::route_generator::GeneratorConfig;
use super::train::{step, Failure, StepOutcome, Train};
use super::types::{DEFAULT_DELTA_T, DEFAULT_MAX_TIME, DEFAULT_SEGMENT_COUNT};

/// Why a validation run did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("run failed: {0}")]
    Failed(#[from] Failure),
    #[error("run did not finish within {max_time}s")]
    Timeout { max_time: f64 },
    #[error("time step {delta_t}s with budget {max_time}s cannot drive a run")]
    InvalidTimeStep { delta_t: f64, max_time: f64 },
}

/// Why a search did not produce a route
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("no feasible route after {attempts} attempts, resume from seed {next_seed}")]
    Exhausted { attempts: u64, next_seed: u64 },
    #[error("route synthesis failed: {0}")]
    Route(#[from] RouteError),
    #[error("time step {delta_t}s with budget {max_time}s cannot drive a run")]
    InvalidTimeStep { delta_t: f64, max_time: f64 },
}

/// A route the train is known to complete
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibleRoute {
    pub route: Route,
    /// Seed the route was synthesized from; continue searching at `seed + 1`
    pub seed: u64,
    /// Simulated seconds the validation run took
    pub completion_time: f64,
}

/// Search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub segment_count: usize,
    /// Simulated time budget for each validation run
    pub max_time: f64,
    pub delta_t: f64,
    /// Give up after this many routes
    pub max_attempts: Option<u64>,
    /// Give up after this much wall time
    pub time_budget: Option<Duration>,
    pub generator: GeneratorConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            segment_count: DEFAULT_SEGMENT_COUNT,
            max_time: DEFAULT_MAX_TIME,
            delta_t: DEFAULT_DELTA_T,
            max_attempts: None,
            time_budget: None,
            generator: GeneratorConfig::default(),
        }
    }
}

fn time_step_is_valid(delta_t: f64, max_time: f64) -> bool {
    delta_t.is_finite() && delta_t > 0.0 && max_time.is_finite() && max_time >= 0.0
}

/// Step `train` along `route` until it finishes, fails or runs out of time.
///
/// Every call to [`step`] accounts for `delta_t` seconds, and a step may only
/// start while the elapsed time is within `max_time`. Returns the elapsed
/// simulated time on success.
pub fn validate(
    train: Train,
    route: &Route,
    max_time: f64,
    delta_t: f64,
) -> Result<f64, ValidationError> {
    if !time_step_is_valid(delta_t, max_time) {
        return Err(ValidationError::InvalidTimeStep { delta_t, max_time });
    }

    // Steps whose start time is still within the budget
    let max_steps = (max_time / delta_t).floor() as u64;
    let mut train = train;

    for taken in 0..=max_steps {
        match step(train, route, delta_t) {
            StepOutcome::Continuing(next) => train = next,
            StepOutcome::FinishedSuccessfully => return Ok((taken + 1) as f64 * delta_t),
            StepOutcome::Failed(failure) => return Err(failure.into()),
        }
    }

    Err(ValidationError::Timeout { max_time })
}

/// Search from `starting_seed` until a route validates, with no ceiling.
///
/// Uses the default time step, time budget and generator bands. This loop only
/// ends on success; use [`search_feasible_route`] to bound it.
pub fn find_feasible_route(
    train_template: &Train,
    segment_count: usize,
    starting_seed: u64,
) -> Result<FeasibleRoute, SearchError> {
    let config = SearchConfig {
        segment_count,
        ..SearchConfig::default()
    };
    search_feasible_route(train_template, starting_seed, &config)
}

/// Search from `starting_seed` until a route validates or a ceiling in
/// `config` is reached.
///
/// Each candidate is validated with a fresh train built from
/// `train_template`. Failed seeds are skipped by incrementing, so the
/// returned seed is never below `starting_seed` unless the seed space wraps.
pub fn search_feasible_route(
    train_template: &Train,
    starting_seed: u64,
    config: &SearchConfig,
) -> Result<FeasibleRoute, SearchError> {
    if !time_step_is_valid(config.delta_t, config.max_time) {
        return Err(SearchError::InvalidTimeStep {
            delta_t: config.delta_t,
            max_time: config.max_time,
        });
    }

    let started = Instant::now();
    let mut seed = starting_seed;
    let mut attempts: u64 = 0;

    loop {
        let exhausted = config.max_attempts.is_some_and(|max| attempts >= max)
            || config
                .time_budget
                .is_some_and(|budget| started.elapsed() >= budget);
        if exhausted {
            error!(
                "Route search exhausted after {} attempts starting at seed {}",
                attempts, starting_seed
            );
            return Err(SearchError::Exhausted {
                attempts,
                next_seed: seed,
            });
        }

        let route = config.generator.synthesize(seed, config.segment_count)?;
        attempts += 1;

        match validate(
            train_template.restarted(),
            &route,
            config.max_time,
            config.delta_t,
        ) {
            Ok(completion_time) => {
                info!(
                    "Found feasible route at seed {} after {} attempts ({:.2}s to complete)",
                    seed, attempts, completion_time
                );
                return Ok(FeasibleRoute {
                    route,
                    seed,
                    completion_time,
                });
            }
            Err(err) => {
                debug!("Seed {} rejected: {}", seed, err);
                seed = seed.wrapping_add(1);
            }
        }
    }
}
