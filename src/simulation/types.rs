//! Core types for the train simulation
//!
//! Segments are the building blocks of a route. The set of kinds is closed.

/// Default fixed time step in seconds (one tick at 60 Hz)
pub const DEFAULT_DELTA_T: f64 = 1.0 / 60.0;

/// Default simulated time budget for a single validation run, in seconds
pub const DEFAULT_MAX_TIME: f64 = 600.0;

/// Default train mass in kilograms
pub const DEFAULT_TRAIN_MASS: f64 = 10_000.0;

/// Default structural force capacity of a train in newtons
pub const DEFAULT_TRAIN_MAX_FORCE: f64 = 50_000.0;

/// Default number of segments in a synthesized route
pub const DEFAULT_SEGMENT_COUNT: usize = 4;

/// A single piece of track
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Plain unpowered rail
    Common { length: f64 },
    /// Powered rail; a positive force accelerates, a negative one brakes
    Force { length: f64, applied_force: f64 },
    /// Zero-length checkpoint the train must not reach too fast
    Station { max_arriving_speed: f64 },
}

/// Discriminant of a [`Segment`], used when drawing variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Common,
    Force,
    Station,
}

impl Segment {
    /// Traversable span in meters. Stations contribute nothing.
    pub fn length(&self) -> f64 {
        match *self {
            Segment::Common { length } => length,
            Segment::Force { length, .. } => length,
            Segment::Station { .. } => 0.0,
        }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Common { .. } => SegmentKind::Common,
            Segment::Force { .. } => SegmentKind::Force,
            Segment::Station { .. } => SegmentKind::Station,
        }
    }

    pub fn is_station(&self) -> bool {
        matches!(self, Segment::Station { .. })
    }

    /// Single character used by the terminal map
    pub fn glyph(&self) -> char {
        match *self {
            Segment::Common { .. } => '=',
            Segment::Force { applied_force, .. } if applied_force >= 0.0 => '>',
            Segment::Force { .. } => '<',
            Segment::Station { .. } => 'S',
        }
    }
}
