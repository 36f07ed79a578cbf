//! Live simulation world
//!
//! Holds a train on a validated route and steps it once per tick. Whenever a
//! run ends, successfully or not, the train is discarded and a freshly
//! validated route is requested from the next seed.

use log::{info, warn};

use super::route::Route;
use super::run_stats::RunStats;
use super::train::{step, Failure, StepOutcome, Train};
use super::validator::{search_feasible_route, SearchConfig, SearchError};

/// Width of the terminal map in characters
pub const MAP_WIDTH: usize = 80;

/// The live simulation
pub struct SimWorld {
    /// Train currently on the route
    pub train: Train,

    /// Route the train is running on
    pub route: Route,

    /// Seed the current route was synthesized from
    pub seed: u64,

    /// Where the next route search begins
    next_seed: u64,

    /// Configuration every fresh train is built from
    template: Train,

    pub config: SearchConfig,

    pub stats: RunStats,
}

impl SimWorld {
    /// Search for a first feasible route starting at `starting_seed`
    pub fn new(
        template: Train,
        config: SearchConfig,
        starting_seed: u64,
    ) -> Result<Self, SearchError> {
        let found = search_feasible_route(&template, starting_seed, &config)?;
        Ok(Self::with_route(template, found.route, found.seed, config))
    }

    /// Start on a route that has not gone through the search
    pub fn with_route(template: Train, route: Route, seed: u64, config: SearchConfig) -> Self {
        let mut stats = RunStats::new();
        stats.start_run();
        Self {
            train: template.restarted(),
            route,
            seed,
            next_seed: seed.wrapping_add(1),
            template,
            config,
            stats,
        }
    }

    /// Swap in an edited route between ticks. The train starts over.
    pub fn replace_route(&mut self, route: Route) {
        self.route = route;
        self.train = self.template.restarted();
        self.stats.start_run();
    }

    pub fn next_seed(&self) -> u64 {
        self.next_seed
    }

    /// Advance the simulation by one fixed tick
    pub fn tick(&mut self, delta_secs: f64) -> StepOutcome {
        let outcome = step(self.train, &self.route, delta_secs);
        self.stats.advance(delta_secs);

        match outcome {
            StepOutcome::Continuing(train) => self.train = train,
            StepOutcome::FinishedSuccessfully => {
                info!(
                    "Route from seed {} completed in {:.2}s",
                    self.seed, self.stats.current_run_time
                );
                self.stats.complete_run();
                self.restart();
            }
            StepOutcome::Failed(failure) => {
                warn!(
                    "Run on seed {} failed at {:.1}m: {}",
                    self.seed, self.train.position, failure
                );
                self.stats.record_failure(failure);
                self.restart();
            }
        }

        outcome
    }

    fn restart(&mut self) {
        match search_feasible_route(&self.template, self.next_seed, &self.config) {
            Ok(found) => {
                self.route = found.route;
                self.seed = found.seed;
                self.next_seed = found.seed.wrapping_add(1);
            }
            Err(SearchError::Exhausted { next_seed, .. }) => {
                warn!("Keeping route from seed {}, search exhausted", self.seed);
                self.stats.searches_exhausted += 1;
                self.next_seed = next_seed;
            }
            Err(err) => {
                warn!("Keeping route from seed {}: {}", self.seed, err);
                self.stats.search_errors += 1;
            }
        }

        self.train = self.template.restarted();
        self.stats.start_run();
    }

    pub fn print_summary(&self) {
        println!("{}", self.stats.summary());
        println!(
            "  Seed: {} | Segments: {} | Length: {:.1}m | End limit: {:.1}m/s",
            self.seed,
            self.route.segments().len(),
            self.route.length(),
            self.route.route_end_speed_limit()
        );
        println!(
            "  Train: {:.1}m at {:.2}m/s (mass {:.0}kg, max force {:.0}N)",
            self.train.position, self.train.speed, self.train.mass, self.train.max_force
        );
        println!("  Success rate: {:.1}%", self.stats.success_rate());
        for failure in Failure::ALL {
            let count = self.stats.failure_count(failure);
            if count > 0 {
                println!("    {}: {}", failure, count);
            }
        }
    }

    /// Render the route as a single line, scaled to `width` characters
    pub fn render_map(&self, width: usize) -> String {
        let width = width.max(1);
        let total = self.route.length();

        let column = |pos: f64| -> usize {
            if total <= 0.0 {
                return 0;
            }
            let col = ((pos / total) * width as f64).floor().max(0.0) as usize;
            col.min(width)
        };

        let mut cells = vec![' '; width];
        let mut offset = 0.0;

        for segment in self.route.segments() {
            let start = column(offset);
            offset += segment.length();

            if segment.is_station() {
                cells[start.min(width - 1)] = segment.glyph();
                continue;
            }

            let end = column(offset).max(start + 1).min(width);
            for cell in cells.iter_mut().take(end).skip(start) {
                if *cell == ' ' {
                    *cell = segment.glyph();
                }
            }
        }

        cells[column(self.train.position).min(width - 1)] = 'T';
        cells.into_iter().collect()
    }

    /// Draw the route and train in the terminal
    pub fn draw_map(&self) {
        println!("\n=== Route Map ===");
        println!("Legend: >=Accelerating, <=Braking, ==Common, S=Station, T=Train");
        println!();
        println!("|{}|", self.render_map(MAP_WIDTH));
        println!();
    }
}
