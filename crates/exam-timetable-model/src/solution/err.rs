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

use crate::common::{ExamIdentifier, RoomIdentifier, SlotIdentifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementCountMismatchError {
    expected: usize,
    actual: usize,
}

impl PlacementCountMismatchError {
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

impl std::fmt::Display for PlacementCountMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Timetable places {} exams but the instance has {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for PlacementCountMismatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomOutOfRangeError {
    exam: ExamIdentifier,
    room: RoomIdentifier,
    room_count: usize,
}

impl RoomOutOfRangeError {
    pub fn new(exam: ExamIdentifier, room: RoomIdentifier, room_count: usize) -> Self {
        Self {
            exam,
            room,
            room_count,
        }
    }

    pub fn exam(&self) -> ExamIdentifier {
        self.exam
    }

    pub fn room(&self) -> RoomIdentifier {
        self.room
    }

    pub fn room_count(&self) -> usize {
        self.room_count
    }
}

impl std::fmt::Display for RoomOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is placed in {} but the instance has only {} rooms",
            self.exam, self.room, self.room_count
        )
    }
}

impl std::error::Error for RoomOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotOutOfRangeError {
    exam: ExamIdentifier,
    slot: SlotIdentifier,
    slot_count: usize,
}

impl SlotOutOfRangeError {
    pub fn new(exam: ExamIdentifier, slot: SlotIdentifier, slot_count: usize) -> Self {
        Self {
            exam,
            slot,
            slot_count,
        }
    }

    pub fn exam(&self) -> ExamIdentifier {
        self.exam
    }

    pub fn slot(&self) -> SlotIdentifier {
        self.slot
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }
}

impl std::fmt::Display for SlotOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is placed in {} but the instance has only {} slots",
            self.exam, self.slot, self.slot_count
        )
    }
}

impl std::error::Error for SlotOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimetableValidationError {
    PlacementCountMismatch(PlacementCountMismatchError),
    RoomOutOfRange(RoomOutOfRangeError),
    SlotOutOfRange(SlotOutOfRangeError),
}

impl std::fmt::Display for TimetableValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimetableValidationError::PlacementCountMismatch(e) => write!(f, "{}", e),
            TimetableValidationError::RoomOutOfRange(e) => write!(f, "{}", e),
            TimetableValidationError::SlotOutOfRange(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TimetableValidationError {}

impl From<PlacementCountMismatchError> for TimetableValidationError {
    fn from(err: PlacementCountMismatchError) -> Self {
        TimetableValidationError::PlacementCountMismatch(err)
    }
}

impl From<RoomOutOfRangeError> for TimetableValidationError {
    fn from(err: RoomOutOfRangeError) -> Self {
        TimetableValidationError::RoomOutOfRange(err)
    }
}

impl From<SlotOutOfRangeError> for TimetableValidationError {
    fn from(err: SlotOutOfRangeError) -> Self {
        TimetableValidationError::SlotOutOfRange(err)
    }
}
