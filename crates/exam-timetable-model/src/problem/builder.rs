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

use crate::common::{ExamIdentifier, StudentIdentifier};
use crate::problem::{err::InstanceError, instance::Instance};
use std::collections::BTreeSet;

/// Mutable collector for building an [`Instance`]. The room count is
/// implied by the capacity table.
#[derive(Debug, Clone, Default)]
pub struct InstanceBuilder {
    student_count: usize,
    exam_count: usize,
    slot_count: usize,
    room_capacities: Vec<u32>,
    enrolments: BTreeSet<(ExamIdentifier, StudentIdentifier)>,
}

impl InstanceBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_students(mut self, count: usize) -> Self {
        self.student_count = count;
        self
    }

    #[inline]
    pub fn with_exams(mut self, count: usize) -> Self {
        self.exam_count = count;
        self
    }

    #[inline]
    pub fn with_slots(mut self, count: usize) -> Self {
        self.slot_count = count;
        self
    }

    #[inline]
    pub fn with_room_capacities<I>(mut self, capacities: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.room_capacities.clear();
        self.room_capacities.extend(capacities);
        self
    }

    #[inline]
    pub fn add_room(&mut self, capacity: u32) -> &mut Self {
        self.room_capacities.push(capacity);
        self
    }

    #[inline]
    pub fn add_enrolment(&mut self, exam: ExamIdentifier, student: StudentIdentifier) -> &mut Self {
        self.enrolments.insert((exam, student));
        self
    }

    #[inline]
    pub fn extend_enrolments<I>(&mut self, it: I) -> &mut Self
    where
        I: IntoIterator<Item = (ExamIdentifier, StudentIdentifier)>,
    {
        self.enrolments.extend(it);
        self
    }

    pub fn build(self) -> Result<Instance, InstanceError> {
        let room_count = self.room_capacities.len();
        Instance::new(
            self.student_count,
            self.exam_count,
            self.slot_count,
            room_count,
            self.room_capacities,
            self.enrolments,
        )
    }
}
