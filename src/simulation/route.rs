//! Route model and geometric queries
//!
//! A route is an ordered, non-empty sequence of segments followed by an
//! end-of-line speed limit.

use thiserror::Error;

use super::train::Train;
use super::types::Segment;

/// Reasons a route cannot be built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("a route needs at least one segment")]
    Empty,
    #[error("segment {index} has invalid length {length}")]
    InvalidLength { index: usize, length: f64 },
    #[error("station at segment {index} has invalid arrival speed {speed}")]
    InvalidArrivalSpeed { index: usize, speed: f64 },
    #[error("force segment {index} has non-finite force {force}")]
    InvalidForce { index: usize, force: f64 },
    #[error("route end speed limit {0} must be a non-negative number")]
    InvalidEndSpeedLimit(f64),
    #[error("a route cannot start with a station")]
    LeadingStation,
    #[error("generator band {name} ({start}..{end}) is empty or not finite")]
    InvalidBand {
        name: &'static str,
        start: f64,
        end: f64,
    },
}

/// An immutable track layout
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    segments: Vec<Segment>,
    route_end_speed_limit: f64,
}

/// Where a train currently is on a route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLocation {
    pub index: usize,
    pub segment: Segment,
    /// Distance from the start of the segment
    pub relative_position: f64,
}

impl Route {
    pub fn new(segments: Vec<Segment>, route_end_speed_limit: f64) -> Result<Self, RouteError> {
        match segments.first() {
            None => return Err(RouteError::Empty),
            Some(first) if first.is_station() => return Err(RouteError::LeadingStation),
            Some(_) => {}
        }
        if !route_end_speed_limit.is_finite() || route_end_speed_limit < 0.0 {
            return Err(RouteError::InvalidEndSpeedLimit(route_end_speed_limit));
        }

        for (index, segment) in segments.iter().enumerate() {
            match *segment {
                Segment::Common { length } => check_length(index, length)?,
                Segment::Force {
                    length,
                    applied_force,
                } => {
                    check_length(index, length)?;
                    if !applied_force.is_finite() {
                        return Err(RouteError::InvalidForce {
                            index,
                            force: applied_force,
                        });
                    }
                }
                Segment::Station { max_arriving_speed } => {
                    if !max_arriving_speed.is_finite() || max_arriving_speed < 0.0 {
                        return Err(RouteError::InvalidArrivalSpeed {
                            index,
                            speed: max_arriving_speed,
                        });
                    }
                }
            }
        }

        Ok(Self {
            segments,
            route_end_speed_limit,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn route_end_speed_limit(&self) -> f64 {
        self.route_end_speed_limit
    }

    /// Total traversable length in meters
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Find the segment whose half-open span `[start, start + length)`
    /// contains the train.
    ///
    /// Returns `None` once the train has passed the last segment, which is how
    /// route completion is detected. Stations have empty spans and are never
    /// returned.
    pub fn locate(&self, train: &Train) -> Option<SegmentLocation> {
        let mut offset = 0.0;
        for (index, segment) in self.segments.iter().enumerate() {
            let end = offset + segment.length();
            if train.position >= offset && train.position < end {
                return Some(SegmentLocation {
                    index,
                    segment: *segment,
                    relative_position: train.position - offset,
                });
            }
            offset = end;
        }
        None
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.segments.len()
    }

    pub fn next_segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index + 1)
    }
}

fn check_length(index: usize, length: f64) -> Result<(), RouteError> {
    if length.is_finite() && length > 0.0 {
        Ok(())
    } else {
        Err(RouteError::InvalidLength { index, length })
    }
}
