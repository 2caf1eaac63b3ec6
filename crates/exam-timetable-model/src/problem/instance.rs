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

use crate::common::{ExamIdentifier, RoomIdentifier, StudentIdentifier};
use crate::problem::err::{
    CapacityMismatchError, ExamOutOfRangeError, InstanceError, StudentOutOfRangeError,
};
use std::collections::BTreeSet;

/// A fully described examination-timetabling instance.
///
/// Immutable once constructed; `new` enforces the input contract
/// (capacity table length, enrolment id ranges). Duplicate enrolment
/// pairs collapse to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    student_count: usize,
    exam_count: usize,
    slot_count: usize,
    room_count: usize,
    room_capacities: Vec<u32>,
    enrolments: BTreeSet<(ExamIdentifier, StudentIdentifier)>,
}

impl Instance {
    pub fn new<I>(
        student_count: usize,
        exam_count: usize,
        slot_count: usize,
        room_count: usize,
        room_capacities: Vec<u32>,
        enrolments: I,
    ) -> Result<Self, InstanceError>
    where
        I: IntoIterator<Item = (ExamIdentifier, StudentIdentifier)>,
    {
        if room_capacities.len() != room_count {
            return Err(InstanceError::from(CapacityMismatchError::new(
                room_count,
                room_capacities.len(),
            )));
        }

        let enrolments: BTreeSet<(ExamIdentifier, StudentIdentifier)> =
            enrolments.into_iter().collect();

        for &(exam, student) in &enrolments {
            if exam.get() >= exam_count {
                return Err(InstanceError::from(ExamOutOfRangeError::new(
                    exam, exam_count,
                )));
            }
            if student.get() >= student_count {
                return Err(InstanceError::from(StudentOutOfRangeError::new(
                    student,
                    student_count,
                )));
            }
        }

        Ok(Self {
            student_count,
            exam_count,
            slot_count,
            room_count,
            room_capacities,
            enrolments,
        })
    }

    #[inline]
    pub fn student_count(&self) -> usize {
        self.student_count
    }

    #[inline]
    pub fn exam_count(&self) -> usize {
        self.exam_count
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.room_count
    }

    #[inline]
    pub fn room_capacities(&self) -> &[u32] {
        &self.room_capacities
    }

    #[inline]
    pub fn capacity_of(&self, room: RoomIdentifier) -> Option<u32> {
        self.room_capacities.get(room.get()).copied()
    }

    #[inline]
    pub fn enrolment_count(&self) -> usize {
        self.enrolments.len()
    }

    #[inline]
    pub fn iter_enrolments(
        &self,
    ) -> impl Iterator<Item = (ExamIdentifier, StudentIdentifier)> + '_ {
        self.enrolments.iter().copied()
    }

    #[inline]
    pub fn iter_exams(&self) -> impl Iterator<Item = ExamIdentifier> {
        (0..self.exam_count).map(ExamIdentifier::new)
    }

    #[inline]
    pub fn iter_rooms(&self) -> impl Iterator<Item = RoomIdentifier> {
        (0..self.room_count).map(RoomIdentifier::new)
    }
}
