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

//! End-to-end runs over the text instance format: parse, solve, check
//! the verdict and the returned schedule.

use exam_timetable_model::common::ExamIdentifier;
use exam_timetable_model::prelude::{InstanceLoader, TimetableValidator};
use exam_timetable_solver::prelude::{
    InfeasibilityReason, PenaltyWeights, SchedulingRules, SolveOutcome, Solver, SolverModel,
    ViolationEvaluator,
};

fn solve_str(text: &str) -> (SolveOutcome, exam_timetable_model::prelude::Instance) {
    let instance = InstanceLoader::new().from_str(text).unwrap();
    let outcome = Solver::new().solve(&instance).unwrap();
    (outcome, instance)
}

#[test]
fn test_single_exam_instance_is_sat() {
    let (outcome, instance) = solve_str(
        "\
Number of students: 1
Number of exams: 1
Number of slots: 1
Number of rooms: 1
Room 0 capacity: 1
0 0
",
    );

    match outcome {
        SolveOutcome::Feasible { timetable, .. } => {
            TimetableValidator::validate(&instance, &timetable).unwrap();
            assert_eq!(timetable.room_of(ExamIdentifier::new(0)).get(), 0);
            assert_eq!(timetable.slot_of(ExamIdentifier::new(0)).get(), 0);
        }
        other => panic!("expected sat, got {other:?}"),
    }
}

#[test]
fn test_shared_student_single_slot_is_unsat() {
    let (outcome, _) = solve_str(
        "\
Number of students: 1
Number of exams: 2
Number of slots: 1
Number of rooms: 2
Room 0 capacity: 1
Room 1 capacity: 1
0 0
1 0
",
    );

    match outcome {
        SolveOutcome::Infeasible {
            reason: InfeasibilityReason::SearchExhausted { best_cost, .. },
            ..
        } => assert!(best_cost > 0),
        other => panic!("expected an exhausted search, got {other:?}"),
    }
}

#[test]
fn test_oversized_exam_is_structurally_unsat() {
    let (outcome, _) = solve_str(
        "\
Number of students: 2
Number of exams: 1
Number of slots: 4
Number of rooms: 1
Room 0 capacity: 1
0 0
0 1
",
    );

    match outcome {
        SolveOutcome::Infeasible {
            reason: InfeasibilityReason::Structural { exam },
            iterations,
            ..
        } => {
            assert_eq!(exam, ExamIdentifier::new(0));
            assert_eq!(iterations, 0);
        }
        other => panic!("expected structural infeasibility, got {other:?}"),
    }
}

#[test]
fn test_feasible_schedule_has_zero_violation_cost() {
    let (outcome, instance) = solve_str(
        "\
Number of students: 3
Number of exams: 3
Number of slots: 8
Number of rooms: 1
Room 0 capacity: 2
0 0
1 1
2 2
",
    );

    match outcome {
        SolveOutcome::Feasible { timetable, .. } => {
            let model = SolverModel::build(&instance, SchedulingRules::default()).unwrap();
            let evaluator = ViolationEvaluator::from_model(&model, PenaltyWeights::default());
            assert_eq!(evaluator.evaluate(&timetable), 0);
        }
        other => panic!("expected sat, got {other:?}"),
    }
}
