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

use crate::config::{PenaltyWeights, SchedulingRules};
use crate::model::SolverModel;
use exam_timetable_model::common::{ExamIdentifier, RoomIdentifier, SlotIdentifier};
use exam_timetable_model::solution::sol::Timetable;
use fxhash::FxHashMap;

pub type Cost = i64;

/// A student may sit at most this many exams per day before the daily
/// overload penalty applies. Fixed, not a tunable.
const DAY_EXAM_CAP: usize = 2;

/// Weighted violation total split by constraint class. Fields sum to
/// [`CostBreakdown::total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostBreakdown {
    pub room_double: Cost,
    pub clash: Cost,
    pub min_gap: Cost,
    pub day_cap: Cost,
    pub turnaround: Cost,
    pub last_slot: Cost,
    pub invigilator: Cost,
}

impl CostBreakdown {
    #[inline]
    pub fn total(&self) -> Cost {
        self.room_double
            + self.clash
            + self.min_gap
            + self.day_cap
            + self.turnaround
            + self.last_slot
            + self.invigilator
    }

    #[inline]
    pub fn is_violation_free(&self) -> bool {
        self.total() == 0
    }
}

/// Pure full-recomputation evaluator. All instance-dependent tables
/// (exam sizes, per-student exam lists, invigilator demands) are copied
/// out of the model once so an evaluation only touches flat arrays.
///
/// Evaluating the same timetable twice yields the same result; nothing
/// is cached between calls.
#[derive(Debug, Clone)]
pub struct ViolationEvaluator {
    weights: PenaltyWeights,
    rules: SchedulingRules,
    exams_by_student: Vec<Vec<ExamIdentifier>>,
    examiner_demand: Vec<u32>,
    is_large: Vec<bool>,
    room_count: usize,
    slot_count: usize,
}

impl ViolationEvaluator {
    pub fn from_model(model: &SolverModel<'_>, weights: PenaltyWeights) -> Self {
        let incidence = model.incidence();

        let exams_by_student = incidence
            .iter_exams_by_student()
            .map(|(_, exams)| exams.iter().copied().collect())
            .collect();

        let is_large = (0..model.exam_count())
            .map(|e| model.is_large(ExamIdentifier::new(e)))
            .collect();

        Self {
            weights,
            rules: *model.rules(),
            exams_by_student,
            examiner_demand: model.examiner_demands().to_vec(),
            is_large,
            room_count: model.instance().room_count(),
            slot_count: model.instance().slot_count(),
        }
    }

    /// Total weighted violation cost; zero iff the timetable violates no
    /// constraint class.
    #[inline]
    pub fn evaluate(&self, timetable: &Timetable) -> Cost {
        self.breakdown(timetable).total()
    }

    pub fn breakdown(&self, timetable: &Timetable) -> CostBreakdown {
        let mut out = CostBreakdown {
            room_double: self.room_double_cost(timetable),
            turnaround: self.turnaround_cost(timetable),
            last_slot: self.last_slot_cost(timetable),
            invigilator: self.invigilator_cost(timetable),
            ..CostBreakdown::default()
        };
        self.student_costs(timetable, &mut out);
        out
    }

    /// k exams sharing a (room, slot) cost `w * (k - 1)`.
    fn room_double_cost(&self, timetable: &Timetable) -> Cost {
        let mut occupancy: FxHashMap<(RoomIdentifier, SlotIdentifier), Cost> =
            FxHashMap::default();
        for (_, room, slot) in timetable.iter_placements() {
            *occupancy.entry((room, slot)).or_insert(0) += 1;
        }
        occupancy
            .values()
            .filter(|&&k| k > 1)
            .map(|&k| self.weights.room_double * (k - 1))
            .sum()
    }

    /// Same-slot clashes, minimum-gap violations and daily overload,
    /// accumulated per student. A same-slot pair incurs both the clash
    /// and the min-gap penalty (slot distance 0 is within the gap).
    fn student_costs(&self, timetable: &Timetable, out: &mut CostBreakdown) {
        let mut day_counts: FxHashMap<usize, usize> = FxHashMap::default();

        for exams in &self.exams_by_student {
            for (i, &a) in exams.iter().enumerate() {
                let ta = timetable.slot_of(a).get() as i64;
                for &b in &exams[i + 1..] {
                    let tb = timetable.slot_of(b).get() as i64;
                    if ta == tb {
                        out.clash += self.weights.clash;
                    }
                    if (ta - tb).abs() <= self.rules.min_gap as i64 {
                        out.min_gap += self.weights.min_gap;
                    }
                }
            }

            day_counts.clear();
            for &exam in exams {
                let day = self.rules.day_of(timetable.slot_of(exam).get());
                *day_counts.entry(day).or_insert(0) += 1;
            }
            for &count in day_counts.values() {
                if count > DAY_EXAM_CAP {
                    out.day_cap += self.weights.day_cap * (count - DAY_EXAM_CAP) as Cost;
                }
            }
        }
    }

    /// Adjacent uses of a room (sorted by slot) closer than the
    /// turnaround gap each cost one penalty.
    fn turnaround_cost(&self, timetable: &Timetable) -> Cost {
        let mut slots_by_room: Vec<Vec<usize>> = vec![Vec::new(); self.room_count];
        for (_, room, slot) in timetable.iter_placements() {
            slots_by_room[room.get()].push(slot.get());
        }

        let mut total = 0;
        for slots in &mut slots_by_room {
            slots.sort_unstable();
            for pair in slots.windows(2) {
                if pair[1] - pair[0] <= self.rules.turnaround_gap {
                    total += self.weights.turnaround;
                }
            }
        }
        total
    }

    fn last_slot_cost(&self, timetable: &Timetable) -> Cost {
        timetable
            .iter_placements()
            .filter(|(exam, _, slot)| {
                self.is_large[exam.get()] && self.rules.is_last_slot_of_day(slot.get())
            })
            .map(|_| self.weights.last_slot)
            .sum()
    }

    /// Per slot, staffing demand over capacity costs `w * excess`.
    fn invigilator_cost(&self, timetable: &Timetable) -> Cost {
        let mut demand_by_slot = vec![0u32; self.slot_count];
        for (exam, _, slot) in timetable.iter_placements() {
            demand_by_slot[slot.get()] += self.examiner_demand[exam.get()];
        }
        demand_by_slot
            .iter()
            .filter(|&&d| d > self.rules.examiner_capacity)
            .map(|&d| self.weights.invigilator * (d - self.rules.examiner_capacity) as Cost)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_timetable_model::common::StudentIdentifier;
    use exam_timetable_model::problem::builder::InstanceBuilder;
    use exam_timetable_model::problem::instance::Instance;

    #[inline]
    fn eid(n: usize) -> ExamIdentifier {
        ExamIdentifier::new(n)
    }

    #[inline]
    fn sid(n: usize) -> StudentIdentifier {
        StudentIdentifier::new(n)
    }

    #[inline]
    fn rid(n: usize) -> RoomIdentifier {
        RoomIdentifier::new(n)
    }

    #[inline]
    fn tid(n: usize) -> SlotIdentifier {
        SlotIdentifier::new(n)
    }

    fn evaluator(instance: &Instance) -> ViolationEvaluator {
        let model = SolverModel::build(instance, SchedulingRules::default()).unwrap();
        ViolationEvaluator::from_model(&model, PenaltyWeights::default())
    }

    /// Two exams, two students (one per exam), two rooms, plenty of
    /// slots. Cost-free unless a fixture forces a violation.
    fn disjoint_instance() -> Instance {
        let mut b = InstanceBuilder::new()
            .with_students(2)
            .with_exams(2)
            .with_slots(8)
            .with_room_capacities([5, 5]);
        b.add_enrolment(eid(0), sid(0));
        b.add_enrolment(eid(1), sid(1));
        b.build().unwrap()
    }

    /// Like `disjoint_instance`, but both exams share one student.
    fn shared_student_instance() -> Instance {
        let mut b = InstanceBuilder::new()
            .with_students(1)
            .with_exams(2)
            .with_slots(8)
            .with_room_capacities([5, 5]);
        b.add_enrolment(eid(0), sid(0));
        b.add_enrolment(eid(1), sid(0));
        b.build().unwrap()
    }

    #[test]
    fn test_violation_free_timetable_costs_zero() {
        let inst = disjoint_instance();
        let eval = evaluator(&inst);
        // Distinct rooms, slots 0 and 4: no class can fire.
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(1), tid(4))]);
        let bd = eval.breakdown(&tt);
        assert!(bd.is_violation_free());
        assert_eq!(eval.evaluate(&tt), 0);
    }

    #[test]
    fn test_room_double_booking_charges_per_extra_exam() {
        let inst = disjoint_instance();
        let eval = evaluator(&inst);
        // Same room, same slot. Also triggers turnaround (gap 0).
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(0), tid(0))]);
        let bd = eval.breakdown(&tt);
        assert_eq!(bd.room_double, 10);
        assert_eq!(bd.clash, 0);
    }

    #[test]
    fn test_same_slot_clash_charges_clash_and_min_gap() {
        let inst = shared_student_instance();
        let eval = evaluator(&inst);
        // Different rooms so the room class stays quiet.
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(1), tid(0))]);
        let bd = eval.breakdown(&tt);
        assert_eq!(bd.clash, 10);
        assert_eq!(bd.min_gap, 6);
        assert_eq!(bd.room_double, 0);
    }

    #[test]
    fn test_adjacent_slots_violate_min_gap_only() {
        let inst = shared_student_instance();
        let eval = evaluator(&inst);
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(1), tid(1))]);
        let bd = eval.breakdown(&tt);
        assert_eq!(bd.clash, 0);
        assert_eq!(bd.min_gap, 6);
    }

    #[test]
    fn test_slots_beyond_min_gap_are_free() {
        let inst = shared_student_instance();
        let eval = evaluator(&inst);
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(1), tid(4))]);
        let bd = eval.breakdown(&tt);
        assert_eq!(bd.clash, 0);
        assert_eq!(bd.min_gap, 0);
    }

    #[test]
    fn test_daily_overload_charges_excess_over_cap() {
        // One student sits three exams on day 0 (slots 0..=2).
        let mut b = InstanceBuilder::new()
            .with_students(1)
            .with_exams(3)
            .with_slots(8)
            .with_room_capacities([5, 5, 5]);
        for e in 0..3 {
            b.add_enrolment(eid(e), sid(0));
        }
        let inst = b.build().unwrap();
        let eval = evaluator(&inst);

        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(1), tid(1)), (rid(2), tid(2))]);
        let bd = eval.breakdown(&tt);
        // 3 exams on one day: one over the cap of 2.
        assert_eq!(bd.day_cap, 8);

        // Moving the third exam to day 1 clears the class.
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(1), tid(1)), (rid(2), tid(5))]);
        assert_eq!(eval.breakdown(&tt).day_cap, 0);
    }

    #[test]
    fn test_turnaround_charges_adjacent_room_reuse() {
        let inst = disjoint_instance();
        let eval = evaluator(&inst);
        // Same room, slots 0 and 1: gap of 1 is within the turnaround.
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(0), tid(1))]);
        let bd = eval.breakdown(&tt);
        assert_eq!(bd.turnaround, 6);
        assert_eq!(bd.room_double, 0);

        // Slots 0 and 2 leave an idle slot in between.
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(0), tid(2))]);
        assert_eq!(eval.breakdown(&tt).turnaround, 0);
    }

    #[test]
    fn test_large_exam_in_last_slot_is_penalised() {
        let mut b = InstanceBuilder::new()
            .with_students(10)
            .with_exams(1)
            .with_slots(4)
            .with_room_capacities([30]);
        for s in 0..10 {
            b.add_enrolment(eid(0), sid(s));
        }
        let inst = b.build().unwrap();
        let eval = evaluator(&inst);

        // Slot 3 is the last slot of day 0. The candidate generator never
        // offers it; the evaluator still prices it for arbitrary input.
        let tt = Timetable::from_placements([(rid(0), tid(3))]);
        assert_eq!(eval.breakdown(&tt).last_slot, 12);

        let tt = Timetable::from_placements([(rid(0), tid(2))]);
        assert_eq!(eval.breakdown(&tt).last_slot, 0);
    }

    #[test]
    fn test_invigilator_overcapacity_charges_excess() {
        // Six small exams (demand 2 each) in one slot: demand 12 over a
        // capacity of 10.
        let mut b = InstanceBuilder::new()
            .with_students(6)
            .with_exams(6)
            .with_slots(4)
            .with_room_capacities([5, 5, 5, 5, 5, 5]);
        for e in 0..6 {
            b.add_enrolment(eid(e), sid(e));
        }
        let inst = b.build().unwrap();
        let eval = evaluator(&inst);

        let tt = Timetable::from_placements(
            (0..6).map(|e| (rid(e), tid(0))).collect::<Vec<_>>(),
        );
        let bd = eval.breakdown(&tt);
        assert_eq!(bd.invigilator, 8 * 2);

        // Spread over two slots the demand is 6 per slot.
        let tt = Timetable::from_placements(
            (0..6).map(|e| (rid(e), tid(e % 2))).collect::<Vec<_>>(),
        );
        assert_eq!(eval.breakdown(&tt).invigilator, 0);
    }

    #[test]
    fn test_breakdown_fields_sum_to_total() {
        let inst = shared_student_instance();
        let eval = evaluator(&inst);
        // Same room, same slot: room double + clash + min gap + turnaround.
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(0), tid(0))]);
        let bd = eval.breakdown(&tt);
        assert_eq!(bd.total(), bd.room_double + bd.clash + bd.min_gap + bd.turnaround);
        assert_eq!(eval.evaluate(&tt), bd.total());
        assert!(bd.total() > 0);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let inst = shared_student_instance();
        let eval = evaluator(&inst);
        let tt = Timetable::from_placements([(rid(0), tid(0)), (rid(1), tid(1))]);
        assert_eq!(eval.evaluate(&tt), eval.evaluate(&tt));
        assert_eq!(eval.breakdown(&tt), eval.breakdown(&tt));
    }
}
