//! Procedural route synthesis
//!
//! Routes are drawn from a seeded [`StdRng`], so the same seed and segment
//! count always produce the same route.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;

use super::route::{Route, RouteError};
use super::types::{Segment, SegmentKind};

const SEGMENT_KINDS: [SegmentKind; 3] = [
    SegmentKind::Common,
    SegmentKind::Force,
    SegmentKind::Station,
];

/// Bands the numeric fields of a synthesized route are drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Route end speed limit in m/s
    pub end_speed_limit: Range<f64>,
    /// Length of plain rail in meters
    pub common_length: Range<f64>,
    /// Length of powered rail in meters
    pub force_length: Range<f64>,
    /// Force applied by powered rail in newtons (negative brakes)
    pub applied_force: Range<f64>,
    /// Station arrival speed limit in m/s
    pub max_arriving_speed: Range<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            end_speed_limit: 10.0..40.0,
            common_length: 100.0..1000.0,
            force_length: 100.0..1000.0,
            applied_force: -40_000.0..60_000.0,
            max_arriving_speed: 5.0..30.0,
        }
    }
}

impl GeneratorConfig {
    /// Build a route from `seed`.
    pub fn synthesize(&self, seed: u64, segment_count: usize) -> Result<Route, RouteError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.synthesize_with(&mut rng, segment_count)
    }

    /// Build a route drawing from an explicit random source.
    ///
    /// The first segment is always powered rail. No two stations are adjacent
    /// and the route never ends on a station; kinds that would break either
    /// rule are redrawn.
    pub fn synthesize_with<R: Rng>(
        &self,
        rng: &mut R,
        segment_count: usize,
    ) -> Result<Route, RouteError> {
        if segment_count == 0 {
            return Err(RouteError::Empty);
        }
        self.check_bands()?;

        let route_end_speed_limit = rng.random_range(self.end_speed_limit.clone());

        let mut segments = Vec::with_capacity(segment_count);
        segments.push(self.force_segment(rng));

        for index in 1..segment_count {
            let is_last = index + 1 == segment_count;
            let previous_is_station = segments.last().is_some_and(Segment::is_station);

            let kind = loop {
                let kind = *SEGMENT_KINDS
                    .choose(rng)
                    .unwrap_or(&SegmentKind::Common);
                if kind == SegmentKind::Station && (previous_is_station || is_last) {
                    continue;
                }
                break kind;
            };

            let segment = match kind {
                SegmentKind::Common => Segment::Common {
                    length: rng.random_range(self.common_length.clone()),
                },
                SegmentKind::Force => self.force_segment(rng),
                SegmentKind::Station => Segment::Station {
                    max_arriving_speed: rng.random_range(self.max_arriving_speed.clone()),
                },
            };
            segments.push(segment);
        }

        Route::new(segments, route_end_speed_limit)
    }

    /// Every band must be finite and non-empty to be sampled from
    pub fn check_bands(&self) -> Result<(), RouteError> {
        let bands = [
            ("end_speed_limit", &self.end_speed_limit),
            ("common_length", &self.common_length),
            ("force_length", &self.force_length),
            ("applied_force", &self.applied_force),
            ("max_arriving_speed", &self.max_arriving_speed),
        ];
        for (name, band) in bands {
            if !(band.start.is_finite() && band.end.is_finite() && band.start < band.end) {
                return Err(RouteError::InvalidBand {
                    name,
                    start: band.start,
                    end: band.end,
                });
            }
        }
        Ok(())
    }

    fn force_segment<R: Rng>(&self, rng: &mut R) -> Segment {
        Segment::Force {
            length: rng.random_range(self.force_length.clone()),
            applied_force: rng.random_range(self.applied_force.clone()),
        }
    }
}

/// Build a route from `seed` using the default bands
pub fn synthesize(seed: u64, segment_count: usize) -> Result<Route, RouteError> {
    GeneratorConfig::default().synthesize(seed, segment_count)
}
