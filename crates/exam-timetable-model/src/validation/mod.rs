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

use crate::problem::instance::Instance;
use crate::solution::err::{
    PlacementCountMismatchError, RoomOutOfRangeError, SlotOutOfRangeError,
    TimetableValidationError,
};
use crate::solution::sol::Timetable;

/// Shape validation of a timetable against its instance: one placement
/// per exam, room and slot ids in range. Constraint violations (clashes,
/// capacity, gaps) are the cost evaluator's concern, not the validator's.
#[derive(Debug, Clone)]
pub struct TimetableValidator;

impl TimetableValidator {
    #[inline]
    pub fn validate_shape(
        instance: &Instance,
        timetable: &Timetable,
    ) -> Result<(), PlacementCountMismatchError> {
        if timetable.exam_count() != instance.exam_count() {
            return Err(PlacementCountMismatchError::new(
                instance.exam_count(),
                timetable.exam_count(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn validate_ranges(
        instance: &Instance,
        timetable: &Timetable,
    ) -> Result<(), TimetableValidationError> {
        for (exam, room, slot) in timetable.iter_placements() {
            if room.get() >= instance.room_count() {
                return Err(RoomOutOfRangeError::new(exam, room, instance.room_count()).into());
            }
            if slot.get() >= instance.slot_count() {
                return Err(SlotOutOfRangeError::new(exam, slot, instance.slot_count()).into());
            }
        }
        Ok(())
    }

    #[inline]
    pub fn validate(
        instance: &Instance,
        timetable: &Timetable,
    ) -> Result<(), TimetableValidationError> {
        Self::validate_shape(instance, timetable)?;
        Self::validate_ranges(instance, timetable)
    }
}
