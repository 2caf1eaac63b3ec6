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

use crate::{
    config::SolverConfig,
    engine::anneal::{AnnealingSearch, SearchStatus},
    err::SolveError,
    eval::cost::{Cost, ViolationEvaluator},
    model::SolverModel,
};
use exam_timetable_model::common::ExamIdentifier;
use exam_timetable_model::problem::err::CapacityMismatchError;
use exam_timetable_model::problem::instance::Instance;
use exam_timetable_model::solution::sol::Timetable;
use std::time::{Duration, Instant};

/// Why no satisfying timetable was produced.
#[derive(Debug, Clone)]
pub enum InfeasibilityReason {
    /// An exam has no structurally feasible candidate; nothing was
    /// searched.
    Structural { exam: ExamIdentifier },
    /// The iteration budget ran out with violations left. The best
    /// assignment found is kept for diagnostics; it is not a certificate
    /// of unsatisfiability.
    SearchExhausted { best: Timetable, best_cost: Cost },
}

/// Result of one solve invocation. Elapsed wall-clock time is recorded
/// for reporting only and never drives control flow.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Feasible {
        timetable: Timetable,
        iterations: usize,
        elapsed: Duration,
    },
    Infeasible {
        reason: InfeasibilityReason,
        iterations: usize,
        elapsed: Duration,
    },
}

impl SolveOutcome {
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, SolveOutcome::Feasible { .. })
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        match self {
            SolveOutcome::Feasible { elapsed, .. } => *elapsed,
            SolveOutcome::Infeasible { elapsed, .. } => *elapsed,
        }
    }

    #[inline]
    pub fn iterations(&self) -> usize {
        match self {
            SolveOutcome::Feasible { iterations, .. } => *iterations,
            SolveOutcome::Infeasible { iterations, .. } => *iterations,
        }
    }
}

/// One-shot solver: derives the solver model, runs the annealing search
/// and maps the result onto the reporting surface. Single-threaded and
/// synchronous; all search state lives inside the one `solve` call.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[inline]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::new(),
        }
    }

    #[inline]
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve(&self, instance: &Instance) -> Result<SolveOutcome, SolveError> {
        let started = Instant::now();

        // The instance constructor already enforces this; re-check at
        // the solver boundary so a hand-built caller type cannot smuggle
        // a short capacity table past the search.
        if instance.room_capacities().len() != instance.room_count() {
            return Err(SolveError::from(CapacityMismatchError::new(
                instance.room_count(),
                instance.room_capacities().len(),
            )));
        }

        tracing::debug!(
            exams = instance.exam_count(),
            rooms = instance.room_count(),
            slots = instance.slot_count(),
            students = instance.student_count(),
            seed = self.config.seed,
            "starting solve"
        );

        let model = match SolverModel::build(instance, self.config.rules) {
            Ok(model) => model,
            Err(structural) => {
                tracing::debug!(exam = %structural.exam(), "structurally infeasible");
                return Ok(SolveOutcome::Infeasible {
                    reason: InfeasibilityReason::Structural {
                        exam: structural.exam(),
                    },
                    iterations: 0,
                    elapsed: started.elapsed(),
                });
            }
        };

        let evaluator = ViolationEvaluator::from_model(&model, self.config.weights);
        let search = AnnealingSearch::new(self.config.annealing);
        let report = search.run(&model, &evaluator, self.config.seed);
        let elapsed = started.elapsed();

        Ok(match report.status {
            SearchStatus::Feasible => SolveOutcome::Feasible {
                timetable: report.timetable,
                iterations: report.iterations,
                elapsed,
            },
            SearchStatus::BestEffort => SolveOutcome::Infeasible {
                reason: InfeasibilityReason::SearchExhausted {
                    best: report.timetable,
                    best_cost: report.cost,
                },
                iterations: report.iterations,
                elapsed,
            },
        })
    }
}
