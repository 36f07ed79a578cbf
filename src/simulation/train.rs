//! Train kinematics for the simulation
//!
//! [`step`] is the whole state machine: it advances a train by one fixed time
//! step along a route and reports either the new train or a terminal outcome.

use thiserror::Error;

use super::route::Route;
use super::types::Segment;

/// Rule violations that end a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Failure {
    #[error("train arrived at a station too fast")]
    ExcessiveSpeedAtStation,
    #[error("train left the end of the route too fast")]
    ExcessiveSpeedAtRouteEnd,
    #[error("train speed became negative")]
    SpeedIsNegative,
    #[error("applied force exceeded what the train can withstand")]
    TrainBrokenFromTooMuchForce,
    #[error("train stalled on unpowered rails")]
    ZeroSpeedOnCommonRails,
}

impl Failure {
    pub const ALL: [Failure; 5] = [
        Failure::ExcessiveSpeedAtStation,
        Failure::ExcessiveSpeedAtRouteEnd,
        Failure::SpeedIsNegative,
        Failure::TrainBrokenFromTooMuchForce,
        Failure::ZeroSpeedOnCommonRails,
    ];
}

/// Result of a single [`step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Continuing(Train),    // Train keeps moving
    FinishedSuccessfully, // Train left the route within the end limit
    Failed(Failure),      // Run is over
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepOutcome::Continuing(_))
    }
}

/// A train on a route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Train {
    /// Offset along the route in meters
    pub position: f64,
    /// Forward speed in m/s
    pub speed: f64,
    /// Largest force magnitude the train survives, in newtons
    pub max_force: f64,
    /// Mass in kilograms
    pub mass: f64,
}

impl Train {
    /// A train at rest at the start of the route
    pub fn new(mass: f64, max_force: f64) -> Self {
        Self {
            position: 0.0,
            speed: 0.0,
            max_force,
            mass,
        }
    }

    /// Same configuration, back at the start and at rest
    pub fn restarted(&self) -> Self {
        Self::new(self.mass, self.max_force)
    }
}

fn finish(speed: f64, route: &Route) -> StepOutcome {
    if speed > route.route_end_speed_limit() {
        StepOutcome::Failed(Failure::ExcessiveSpeedAtRouteEnd)
    } else {
        StepOutcome::FinishedSuccessfully
    }
}

/// Advance `train` by `delta_t` seconds along `route`.
///
/// Pure: the same inputs always produce the same outcome.
pub fn step(train: Train, route: &Route, delta_t: f64) -> StepOutcome {
    let Some(location) = route.locate(&train) else {
        return finish(train.speed, route);
    };

    let previous_speed = train.speed;
    let mut speed = train.speed;

    let delta_pos = match location.segment {
        Segment::Common { .. } => {
            if speed <= 0.0 {
                return StepOutcome::Failed(Failure::ZeroSpeedOnCommonRails);
            }
            delta_t * speed
        }
        Segment::Force { applied_force, .. } => {
            if applied_force.abs() > train.max_force {
                return StepOutcome::Failed(Failure::TrainBrokenFromTooMuchForce);
            }
            // Half the step at the old speed, half at the new one
            let mut delta_pos = delta_t * speed / 2.0;
            speed += applied_force / train.mass * delta_t;
            delta_pos += delta_t * speed / 2.0;
            delta_pos
        }
        Segment::Station { .. } => 0.0,
    };

    let position = train.position + delta_pos;

    if speed < 0.0 {
        return StepOutcome::Failed(Failure::SpeedIsNegative);
    }

    // Landing exactly on the end is a crossing; locate already puts that point
    // past any station at the boundary
    if delta_pos + location.relative_position >= location.segment.length() {
        if route.is_last(location.index) {
            return finish(speed, route);
        }
        // Arrival is judged on the speed the train entered the crossing with
        if let Some(Segment::Station { max_arriving_speed }) = route.next_segment(location.index)
        {
            if previous_speed > *max_arriving_speed {
                return StepOutcome::Failed(Failure::ExcessiveSpeedAtStation);
            }
        }
    }

    StepOutcome::Continuing(Train {
        position,
        speed,
        ..train
    })
}
