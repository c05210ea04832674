//! Random process-set generation.
//!
//! Produces workloads in the classic textbook shape: a handful of
//! processes arriving early, medium CPU bursts, and a few I/O waits spread
//! evenly through each burst. Every generated set passes
//! [`validate_specs`](crate::validation::validate_specs).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{IoEpisode, ProcessId, ProcessSpec, Tick};

/// Random process-set generator. All ranges are inclusive.
///
/// # Example
/// ```
/// use u_procsim::generator::ProcessGenerator;
/// use u_procsim::validation::validate_specs;
///
/// let specs = ProcessGenerator::new(5).generate_seeded(1);
/// assert_eq!(specs.len(), 5);
/// assert!(validate_specs(&specs, 5).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessGenerator {
    /// Number of processes.
    pub count: usize,
    /// Latest arrival tick.
    pub max_arrival: Tick,
    /// Shortest CPU burst.
    pub min_burst: Tick,
    /// Longest CPU burst.
    pub max_burst: Tick,
    /// Largest priority value (priorities are `0..=max_priority`).
    pub max_priority: i32,
    /// Most I/O episodes per process.
    pub max_io_episodes: usize,
    /// Shortest I/O wait.
    pub min_io_duration: Tick,
    /// Longest I/O wait.
    pub max_io_duration: Tick,
}

impl ProcessGenerator {
    /// Creates a generator for `count` processes with the default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_arrival: 19,
            min_burst: 5,
            max_burst: 24,
            max_priority: 9,
            max_io_episodes: 4,
            min_io_duration: 2,
            max_io_duration: 9,
        }
    }

    /// Sets the latest arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: Tick) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the CPU burst range.
    pub fn with_burst_range(mut self, min: Tick, max: Tick) -> Self {
        self.min_burst = min;
        self.max_burst = max;
        self
    }

    /// Sets the most I/O episodes per process.
    pub fn with_max_io_episodes(mut self, max_io_episodes: usize) -> Self {
        self.max_io_episodes = max_io_episodes;
        self
    }

    /// Generates a process set with ids `1..=count`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ProcessSpec> {
        (1..=self.count)
            .map(|id| self.generate_one(id as ProcessId, rng))
            .collect()
    }

    /// Generates a reproducible process set from a seed.
    pub fn generate_seeded(&self, seed: u64) -> Vec<ProcessSpec> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    fn generate_one<R: Rng + ?Sized>(&self, id: ProcessId, rng: &mut R) -> ProcessSpec {
        let min_burst = self.min_burst.max(1);
        let burst = rng.random_range(min_burst..=self.max_burst.max(min_burst));
        let arrival = rng.random_range(0..=self.max_arrival);
        let priority = rng.random_range(0..=self.max_priority.max(0));

        let mut spec = ProcessSpec::new(id, arrival, burst).with_priority(priority);
        let episodes = rng.random_range(0..=self.max_io_episodes);
        spec.io_episodes = self.generate_io(burst, episodes, rng);
        spec
    }

    /// Spreads `count` request points over the burst: the j-th lands in
    /// the first half of the j-th of `count + 1` equal segments.
    fn generate_io<R: Rng + ?Sized>(
        &self,
        burst: Tick,
        count: usize,
        rng: &mut R,
    ) -> Vec<IoEpisode> {
        let min_duration = self.min_io_duration.max(1);
        let max_duration = self.max_io_duration.max(min_duration);
        let segment = burst / (count as Tick + 1);

        let mut episodes: Vec<IoEpisode> = Vec::with_capacity(count);
        for j in 0..count as Tick {
            let request_at = (segment * (j + 1) + rng.random_range(0..=segment / 2)).min(burst - 1);
            let duration = rng.random_range(min_duration..=max_duration);

            let follows = episodes.last().map_or(true, |e| request_at > e.request_at);
            if request_at > 0 && follows {
                episodes.push(IoEpisode::new(request_at, duration));
            }
        }
        episodes
    }
}

impl Default for ProcessGenerator {
    fn default() -> Self {
        Self::new(5)
    }
}
