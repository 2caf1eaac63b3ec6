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

use crate::config::SchedulingRules;
use exam_timetable_model::common::{ExamIdentifier, RoomIdentifier, SlotIdentifier};
use exam_timetable_model::problem::{incidence::IncidenceIndex, instance::Instance};

/// One structurally feasible placement for an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub room: RoomIdentifier,
    pub slot: SlotIdentifier,
}

impl Candidate {
    #[inline]
    pub fn new(room: RoomIdentifier, slot: SlotIdentifier) -> Self {
        Self { room, slot }
    }
}

/// Per-exam feasible (room, slot) pairs under the two always-hard rules:
/// the exam fits the room, and a large exam is never offered a last slot
/// of a day. Enumeration is room-major (rooms ascending, slots ascending
/// within a room). The order is part of the solver's deterministic
/// behavior: candidate indices map one-to-one onto rng draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    per_exam: Vec<Vec<Candidate>>,
}

impl CandidateSet {
    pub fn generate(
        instance: &Instance,
        incidence: &IncidenceIndex,
        rules: &SchedulingRules,
    ) -> Self {
        let mut per_exam = Vec::with_capacity(instance.exam_count());

        for exam in instance.iter_exams() {
            let size = incidence.exam_size(exam);
            let large = size >= rules.large_exam_threshold;

            let mut list = Vec::new();
            for room in instance.iter_rooms() {
                let capacity = instance.room_capacities()[room.get()] as usize;
                if size > capacity {
                    continue;
                }
                for slot in 0..instance.slot_count() {
                    if large && rules.is_last_slot_of_day(slot) {
                        continue;
                    }
                    list.push(Candidate::new(room, SlotIdentifier::new(slot)));
                }
            }
            per_exam.push(list);
        }

        Self { per_exam }
    }

    #[inline]
    pub fn of(&self, exam: ExamIdentifier) -> &[Candidate] {
        &self.per_exam[exam.get()]
    }

    #[inline]
    pub fn exam_count(&self) -> usize {
        self.per_exam.len()
    }

    /// First exam with an empty candidate list, if any. A hit certifies
    /// structural infeasibility and must keep the search from starting.
    #[inline]
    pub fn first_unplaceable(&self) -> Option<ExamIdentifier> {
        self.per_exam
            .iter()
            .position(|list| list.is_empty())
            .map(ExamIdentifier::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_timetable_model::common::StudentIdentifier;
    use exam_timetable_model::problem::builder::InstanceBuilder;

    #[inline]
    fn eid(n: usize) -> ExamIdentifier {
        ExamIdentifier::new(n)
    }

    #[inline]
    fn sid(n: usize) -> StudentIdentifier {
        StudentIdentifier::new(n)
    }

    fn generate(instance: &Instance, rules: &SchedulingRules) -> CandidateSet {
        let incidence = IncidenceIndex::from_instance(instance);
        CandidateSet::generate(instance, &incidence, rules)
    }

    #[test]
    fn test_candidates_are_room_major_and_exhaustive() {
        let inst = InstanceBuilder::new()
            .with_exams(1)
            .with_slots(2)
            .with_room_capacities([5, 5])
            .build()
            .unwrap();
        let set = generate(&inst, &SchedulingRules::default());

        let got: Vec<(usize, usize)> = set
            .of(eid(0))
            .iter()
            .map(|c| (c.room.get(), c.slot.get()))
            .collect();
        assert_eq!(got, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_undersized_rooms_are_filtered_out() {
        let mut b = InstanceBuilder::new()
            .with_students(3)
            .with_exams(1)
            .with_slots(2)
            .with_room_capacities([2, 3]);
        for s in 0..3 {
            b.add_enrolment(eid(0), sid(s));
        }
        let inst = b.build().unwrap();
        let set = generate(&inst, &SchedulingRules::default());

        assert!(set.of(eid(0)).iter().all(|c| c.room.get() == 1));
        assert_eq!(set.of(eid(0)).len(), 2);
    }

    #[test]
    fn test_large_exam_skips_last_slot_of_each_day() {
        // 10 students reach the default large-exam threshold.
        let mut b = InstanceBuilder::new()
            .with_students(10)
            .with_exams(1)
            .with_slots(8)
            .with_room_capacities([30]);
        for s in 0..10 {
            b.add_enrolment(eid(0), sid(s));
        }
        let inst = b.build().unwrap();
        let set = generate(&inst, &SchedulingRules::default());

        let slots: Vec<usize> = set.of(eid(0)).iter().map(|c| c.slot.get()).collect();
        assert_eq!(slots, vec![0, 1, 2, 4, 5, 6]);
    }

    #[test]
    fn test_small_exam_keeps_last_slots() {
        let inst = InstanceBuilder::new()
            .with_exams(1)
            .with_slots(4)
            .with_room_capacities([1])
            .build()
            .unwrap();
        let set = generate(&inst, &SchedulingRules::default());
        let slots: Vec<usize> = set.of(eid(0)).iter().map(|c| c.slot.get()).collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_unplaceable_exam_is_detected() {
        let mut b = InstanceBuilder::new()
            .with_students(2)
            .with_exams(2)
            .with_slots(4)
            .with_room_capacities([1]);
        b.add_enrolment(eid(1), sid(0));
        b.add_enrolment(eid(1), sid(1));
        let inst = b.build().unwrap();
        let set = generate(&inst, &SchedulingRules::default());

        assert!(!set.of(eid(0)).is_empty());
        assert!(set.of(eid(1)).is_empty());
        assert_eq!(set.first_unplaceable(), Some(eid(1)));
    }

    #[test]
    fn test_no_rooms_or_no_slots_leaves_every_exam_unplaceable() {
        let inst = InstanceBuilder::new()
            .with_exams(1)
            .with_slots(0)
            .with_room_capacities([4])
            .build()
            .unwrap();
        let set = generate(&inst, &SchedulingRules::default());
        assert_eq!(set.first_unplaceable(), Some(eid(0)));
    }
}
