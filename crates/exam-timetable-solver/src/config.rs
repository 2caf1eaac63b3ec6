// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::eval::cost::Cost;

/// Hard/soft scheduling rules shared by candidate generation and cost
/// evaluation. `slots_per_day == 0` means a single unbounded day: no day
/// boundaries and no last-slot exclusions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingRules {
    pub slots_per_day: usize,
    pub min_gap: usize,
    pub turnaround_gap: usize,
    pub large_exam_threshold: usize,
    pub examiner_capacity: u32,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            slots_per_day: 4,
            min_gap: 1,
            turnaround_gap: 1,
            large_exam_threshold: 10,
            examiner_capacity: 10,
        }
    }
}

impl SchedulingRules {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slots_per_day(mut self, n: usize) -> Self {
        self.slots_per_day = n;
        self
    }

    pub fn with_min_gap(mut self, gap: usize) -> Self {
        self.min_gap = gap;
        self
    }

    pub fn with_turnaround_gap(mut self, gap: usize) -> Self {
        self.turnaround_gap = gap;
        self
    }

    pub fn with_large_exam_threshold(mut self, threshold: usize) -> Self {
        self.large_exam_threshold = threshold;
        self
    }

    pub fn with_examiner_capacity(mut self, capacity: u32) -> Self {
        self.examiner_capacity = capacity;
        self
    }

    #[inline]
    pub fn day_of(&self, slot: usize) -> usize {
        if self.slots_per_day > 0 {
            slot / self.slots_per_day
        } else {
            0
        }
    }

    #[inline]
    pub fn is_last_slot_of_day(&self, slot: usize) -> bool {
        self.slots_per_day > 0 && slot % self.slots_per_day == self.slots_per_day - 1
    }
}

/// Weighted penalties per violation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyWeights {
    pub room_double: Cost,
    pub clash: Cost,
    pub min_gap: Cost,
    pub day_cap: Cost,
    pub turnaround: Cost,
    pub last_slot: Cost,
    pub invigilator: Cost,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            room_double: 10,
            clash: 10,
            min_gap: 6,
            day_cap: 8,
            turnaround: 6,
            last_slot: 12,
            invigilator: 8,
        }
    }
}

impl PenaltyWeights {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Geometric cooling schedule, indexed by iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingSchedule {
    pub max_iterations: usize,
    pub initial_temperature: f64,
    pub final_temperature: f64,
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        Self {
            max_iterations: 20_000,
            initial_temperature: 3.0,
            final_temperature: 0.01,
        }
    }
}

impl AnnealingSchedule {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t0: f64) -> Self {
        self.initial_temperature = t0.max(1e-8);
        self
    }

    pub fn with_final_temperature(mut self, t_end: f64) -> Self {
        self.final_temperature = t_end.max(1e-9);
        self
    }

    /// Temperature at `iteration`: `T0 * (Tend/T0)^(it / max_iterations)`.
    /// Only meaningful while the budget is non-zero.
    #[inline]
    pub fn temperature_at(&self, iteration: usize) -> f64 {
        debug_assert!(self.max_iterations > 0);
        let progress = iteration as f64 / self.max_iterations as f64;
        self.initial_temperature * (self.final_temperature / self.initial_temperature).powf(progress)
    }
}

/// Everything a solve depends on, passed in explicitly rather than read
/// from global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub rules: SchedulingRules,
    pub weights: PenaltyWeights,
    pub annealing: AnnealingSchedule,
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverConfig {
    #[inline]
    pub fn new() -> Self {
        Self {
            rules: SchedulingRules::default(),
            weights: PenaltyWeights::default(),
            annealing: AnnealingSchedule::default(),
            seed: 42,
        }
    }

    pub fn with_rules(mut self, rules: SchedulingRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_annealing(mut self, annealing: AnnealingSchedule) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_documented_values() {
        let rules = SchedulingRules::default();
        assert_eq!(rules.slots_per_day, 4);
        assert_eq!(rules.min_gap, 1);
        assert_eq!(rules.turnaround_gap, 1);
        assert_eq!(rules.large_exam_threshold, 10);
        assert_eq!(rules.examiner_capacity, 10);
    }

    #[test]
    fn test_day_partition_with_four_slots_per_day() {
        let rules = SchedulingRules::default();
        assert_eq!(rules.day_of(0), 0);
        assert_eq!(rules.day_of(3), 0);
        assert_eq!(rules.day_of(4), 1);
        assert!(rules.is_last_slot_of_day(3));
        assert!(rules.is_last_slot_of_day(7));
        assert!(!rules.is_last_slot_of_day(4));
    }

    #[test]
    fn test_zero_slots_per_day_means_single_day_without_last_slots() {
        let rules = SchedulingRules::default().with_slots_per_day(0);
        assert_eq!(rules.day_of(17), 0);
        assert!(!rules.is_last_slot_of_day(17));
    }

    #[test]
    fn test_temperature_decays_geometrically() {
        let sched = AnnealingSchedule::default();
        assert!((sched.temperature_at(0) - 3.0).abs() < 1e-12);
        let t_last = sched.temperature_at(sched.max_iterations);
        assert!((t_last - 0.01).abs() < 1e-9);
        assert!(sched.temperature_at(10_000) < sched.temperature_at(100));
    }

    #[test]
    fn test_temperature_builders_clamp_to_positive() {
        let sched = AnnealingSchedule::default()
            .with_initial_temperature(-1.0)
            .with_final_temperature(0.0);
        assert!(sched.initial_temperature > 0.0);
        assert!(sched.final_temperature > 0.0);
    }

    #[test]
    fn test_config_carries_default_seed() {
        let cfg = SolverConfig::new();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.with_seed(7).seed, 7);
    }
}
