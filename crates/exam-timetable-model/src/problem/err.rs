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
use std::num::ParseIntError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityMismatchError {
    expected: usize,
    actual: usize,
}

impl CapacityMismatchError {
    pub fn new(expected: usize, actual: usize) -> Self {
        Self { expected, actual }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn actual(&self) -> usize {
        self.actual
    }
}

impl std::fmt::Display for CapacityMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Room capacity table has {} entries but the instance declares {} rooms",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for CapacityMismatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExamOutOfRangeError {
    exam: ExamIdentifier,
    exam_count: usize,
}

impl ExamOutOfRangeError {
    pub fn new(exam: ExamIdentifier, exam_count: usize) -> Self {
        Self { exam, exam_count }
    }

    pub fn exam(&self) -> ExamIdentifier {
        self.exam
    }

    pub fn exam_count(&self) -> usize {
        self.exam_count
    }
}

impl std::fmt::Display for ExamOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Enrolment references {} but the instance has only {} exams",
            self.exam, self.exam_count
        )
    }
}

impl std::error::Error for ExamOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentOutOfRangeError {
    student: StudentIdentifier,
    student_count: usize,
}

impl StudentOutOfRangeError {
    pub fn new(student: StudentIdentifier, student_count: usize) -> Self {
        Self {
            student,
            student_count,
        }
    }

    pub fn student(&self) -> StudentIdentifier {
        self.student
    }

    pub fn student_count(&self) -> usize {
        self.student_count
    }
}

impl std::fmt::Display for StudentOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Enrolment references {} but the instance has only {} students",
            self.student, self.student_count
        )
    }
}

impl std::error::Error for StudentOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceError {
    CapacityMismatch(CapacityMismatchError),
    ExamOutOfRange(ExamOutOfRangeError),
    StudentOutOfRange(StudentOutOfRangeError),
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::CapacityMismatch(e) => write!(f, "{}", e),
            InstanceError::ExamOutOfRange(e) => write!(f, "{}", e),
            InstanceError::StudentOutOfRange(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InstanceError {}

impl From<CapacityMismatchError> for InstanceError {
    fn from(err: CapacityMismatchError) -> Self {
        InstanceError::CapacityMismatch(err)
    }
}

impl From<ExamOutOfRangeError> for InstanceError {
    fn from(err: ExamOutOfRangeError) -> Self {
        InstanceError::ExamOutOfRange(err)
    }
}

impl From<StudentOutOfRangeError> for InstanceError {
    fn from(err: StudentOutOfRangeError) -> Self {
        InstanceError::StudentOutOfRange(err)
    }
}

#[derive(Debug)]
pub enum InstanceLoaderError {
    Io(std::io::Error),
    UnexpectedEof,
    InvalidHeader { expected: String, line: String },
    InvalidEnrolment { line: String },
    ParseInt(ParseIntError),
    Instance(InstanceError),
}

impl std::fmt::Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceLoaderError::Io(e) => write!(f, "I/O error: {}", e),
            InstanceLoaderError::UnexpectedEof => write!(f, "Unexpected end of input"),
            InstanceLoaderError::InvalidHeader { expected, line } => {
                write!(f, "Expected `{}: <n>` but found `{}`", expected, line)
            }
            InstanceLoaderError::InvalidEnrolment { line } => {
                write!(f, "Expected `<exam> <student>` but found `{}`", line)
            }
            InstanceLoaderError::ParseInt(e) => write!(f, "Integer parse error: {}", e),
            InstanceLoaderError::Instance(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InstanceLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstanceLoaderError::Io(e) => Some(e),
            InstanceLoaderError::ParseInt(e) => Some(e),
            InstanceLoaderError::Instance(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(err: std::io::Error) -> Self {
        InstanceLoaderError::Io(err)
    }
}

impl From<ParseIntError> for InstanceLoaderError {
    fn from(err: ParseIntError) -> Self {
        InstanceLoaderError::ParseInt(err)
    }
}

impl From<InstanceError> for InstanceLoaderError {
    fn from(err: InstanceError) -> Self {
        InstanceLoaderError::Instance(err)
    }
}
