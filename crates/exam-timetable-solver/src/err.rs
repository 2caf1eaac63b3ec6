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

use exam_timetable_model::common::ExamIdentifier;
use exam_timetable_model::problem::err::CapacityMismatchError;

/// An exam with no structurally feasible (room, slot) candidate: it fits
/// no room, or every admissible slot is excluded. Detected before any
/// search budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructurallyInfeasibleError {
    exam: ExamIdentifier,
}

impl StructurallyInfeasibleError {
    pub fn new(exam: ExamIdentifier) -> Self {
        Self { exam }
    }

    pub fn exam(&self) -> ExamIdentifier {
        self.exam
    }
}

impl std::fmt::Display for StructurallyInfeasibleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No feasible (room, slot) candidate for {}", self.exam)
    }
}

impl std::error::Error for StructurallyInfeasibleError {}

/// Input-contract violations surfaced by the solver itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveError {
    CapacityMismatch(CapacityMismatchError),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::CapacityMismatch(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<CapacityMismatchError> for SolveError {
    fn from(err: CapacityMismatchError) -> Self {
        SolveError::CapacityMismatch(err)
    }
}
