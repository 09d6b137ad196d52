//! Fixed-timestep accumulator
//!
//! Frame deltas are added to a persistent accumulator, which is drained in
//! whole fixed intervals. The remainder carries over to the next frame, so
//! the number of fixed steps over any run depends only on the total time fed
//! in, not on how it was split into frames.

use crate::config::SimulationConfig;

/// Accumulates frame time and hands it out in fixed steps
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationLoop {
    accumulator: f64,
    fixed_interval: f64,
}

impl SimulationLoop {
    /// Loop with the given fixed interval in seconds
    pub fn new(fixed_interval: f64) -> Self {
        Self {
            accumulator: 0.0,
            fixed_interval,
        }
    }

    /// Loop configured from [`SimulationConfig`]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.fixed_interval)
    }

    /// Add a frame delta to the accumulator
    pub fn accumulate(&mut self, delta_time: f64) {
        self.accumulator += delta_time;
    }

    /// Consume one fixed interval if enough time has accumulated
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_interval {
            self.accumulator -= self.fixed_interval;
            true
        } else {
            false
        }
    }

    /// Accumulate `delta_time` and return how many fixed steps are now due
    pub fn advance(&mut self, delta_time: f64) -> u32 {
        self.accumulate(delta_time);
        let mut steps = 0;
        while self.consume_step() {
            steps += 1;
        }
        steps
    }

    /// Time carried over to the next frame
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Length of one fixed step in seconds
    pub fn fixed_interval(&self) -> f64 {
        self.fixed_interval
    }

    /// Drop any carried-over time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for SimulationLoop {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_remainder_is_carried_forward() {
        let mut sim = SimulationLoop::new(0.01);
        assert_eq!(sim.advance(0.035), 3);
        assert_relative_eq!(sim.accumulator(), 0.005, epsilon = 1e-9);

        assert_eq!(sim.advance(0.004), 0);
        assert_relative_eq!(sim.accumulator(), 0.009, epsilon = 1e-9);

        assert_eq!(sim.advance(0.002), 1);
        assert_relative_eq!(sim.accumulator(), 0.001, epsilon = 1e-9);
    }

    #[test]
    fn test_step_count_independent_of_frame_split() {
        let mut whole = SimulationLoop::new(0.0625);
        let mut split = SimulationLoop::new(0.0625);

        let total = whole.advance(0.5);
        let pieces: u32 = [0.03125, 0.1875, 0.15625, 0.125].iter().map(|&dt| split.advance(dt)).sum();
        assert_eq!(total, 8);
        assert_eq!(pieces, 8);
        assert_eq!(split.accumulator(), 0.0);
    }

    #[test]
    fn test_zero_delta_runs_nothing() {
        let mut sim = SimulationLoop::default();
        assert_relative_eq!(sim.fixed_interval(), 0.01);
        assert_eq!(sim.advance(0.0), 0);

        sim.accumulate(0.5);
        sim.reset();
        assert_eq!(sim.accumulator(), 0.0);
    }
}
