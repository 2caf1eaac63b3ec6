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

/// A complete assignment exam → (room, slot), stored as two parallel
/// vectors indexed by exam id. Always complete once constructed; the
/// search engine mutates placements in place through [`Timetable::place`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    rooms: Vec<RoomIdentifier>,
    slots: Vec<SlotIdentifier>,
}

impl Timetable {
    #[inline]
    pub fn from_placements<I>(placements: I) -> Self
    where
        I: IntoIterator<Item = (RoomIdentifier, SlotIdentifier)>,
    {
        let (rooms, slots) = placements.into_iter().unzip();
        Self { rooms, slots }
    }

    #[inline]
    pub fn empty() -> Self {
        Self {
            rooms: Vec::new(),
            slots: Vec::new(),
        }
    }

    #[inline]
    pub fn exam_count(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Panics if `exam` is out of range; shape checks live in
    /// [`crate::validation::TimetableValidator`].
    #[inline]
    pub fn room_of(&self, exam: ExamIdentifier) -> RoomIdentifier {
        self.rooms[exam.get()]
    }

    #[inline]
    pub fn slot_of(&self, exam: ExamIdentifier) -> SlotIdentifier {
        self.slots[exam.get()]
    }

    #[inline]
    pub fn placement_of(&self, exam: ExamIdentifier) -> (RoomIdentifier, SlotIdentifier) {
        (self.room_of(exam), self.slot_of(exam))
    }

    #[inline]
    pub fn place(&mut self, exam: ExamIdentifier, room: RoomIdentifier, slot: SlotIdentifier) {
        debug_assert!(exam.get() < self.rooms.len());
        self.rooms[exam.get()] = room;
        self.slots[exam.get()] = slot;
    }

    #[inline]
    pub fn iter_placements(
        &self,
    ) -> impl Iterator<Item = (ExamIdentifier, RoomIdentifier, SlotIdentifier)> + '_ {
        self.rooms
            .iter()
            .zip(self.slots.iter())
            .enumerate()
            .map(|(e, (&r, &t))| (ExamIdentifier::new(e), r, t))
    }
}
