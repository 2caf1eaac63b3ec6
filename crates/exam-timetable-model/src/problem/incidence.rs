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
use crate::problem::instance::Instance;
use std::collections::BTreeSet;

/// Read-only exam/student incidence, derived once per solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceIndex {
    students_by_exam: Vec<BTreeSet<StudentIdentifier>>,
    exams_by_student: Vec<BTreeSet<ExamIdentifier>>,
    exam_sizes: Vec<usize>,
}

impl IncidenceIndex {
    pub fn from_instance(instance: &Instance) -> Self {
        let mut students_by_exam = vec![BTreeSet::new(); instance.exam_count()];
        let mut exams_by_student = vec![BTreeSet::new(); instance.student_count()];

        for (exam, student) in instance.iter_enrolments() {
            students_by_exam[exam.get()].insert(student);
            exams_by_student[student.get()].insert(exam);
        }

        let exam_sizes = students_by_exam.iter().map(|s| s.len()).collect();

        Self {
            students_by_exam,
            exams_by_student,
            exam_sizes,
        }
    }

    #[inline]
    pub fn exam_count(&self) -> usize {
        self.students_by_exam.len()
    }

    #[inline]
    pub fn student_count(&self) -> usize {
        self.exams_by_student.len()
    }

    #[inline]
    pub fn students_of(&self, exam: ExamIdentifier) -> &BTreeSet<StudentIdentifier> {
        &self.students_by_exam[exam.get()]
    }

    #[inline]
    pub fn exams_of(&self, student: StudentIdentifier) -> &BTreeSet<ExamIdentifier> {
        &self.exams_by_student[student.get()]
    }

    #[inline]
    pub fn exam_size(&self, exam: ExamIdentifier) -> usize {
        self.exam_sizes[exam.get()]
    }

    #[inline]
    pub fn exam_sizes(&self) -> &[usize] {
        &self.exam_sizes
    }

    #[inline]
    pub fn iter_exams_by_student(
        &self,
    ) -> impl Iterator<Item = (StudentIdentifier, &BTreeSet<ExamIdentifier>)> {
        self.exams_by_student
            .iter()
            .enumerate()
            .map(|(s, exams)| (StudentIdentifier::new(s), exams))
    }
}
