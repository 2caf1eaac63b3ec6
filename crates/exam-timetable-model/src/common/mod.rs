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

pub trait IdentifierMarkerName: Copy {
    const NAME: &'static str;
}

/// Phantom-typed identifier. Exams, rooms, slots and students all use
/// dense 0-based ids; the marker keeps them from mixing at compile time.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier<I, U>(I, core::marker::PhantomData<U>);

impl<I, U> Identifier<I, U> {
    #[inline]
    pub fn new(id: I) -> Self {
        Self(id, core::marker::PhantomData)
    }

    #[inline]
    pub fn value(&self) -> &I {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I: Copy, U> Identifier<I, U> {
    #[inline]
    pub fn get(&self) -> I {
        self.0
    }
}

impl<I, U> std::fmt::Display for Identifier<I, U>
where
    I: std::fmt::Display,
    U: IdentifierMarkerName,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExamIdentifierMarker;

impl IdentifierMarkerName for ExamIdentifierMarker {
    const NAME: &'static str = "ExamId";
}

pub type ExamIdentifier = Identifier<usize, ExamIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomIdentifierMarker;

impl IdentifierMarkerName for RoomIdentifierMarker {
    const NAME: &'static str = "RoomId";
}

pub type RoomIdentifier = Identifier<usize, RoomIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIdentifierMarker;

impl IdentifierMarkerName for SlotIdentifierMarker {
    const NAME: &'static str = "SlotId";
}

pub type SlotIdentifier = Identifier<usize, SlotIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentIdentifierMarker;

impl IdentifierMarkerName for StudentIdentifierMarker {
    const NAME: &'static str = "StudentId";
}

pub type StudentIdentifier = Identifier<usize, StudentIdentifierMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_display_with_marker_name() {
        assert_eq!(ExamIdentifier::new(3).to_string(), "ExamId(3)");
        assert_eq!(RoomIdentifier::new(0).to_string(), "RoomId(0)");
        assert_eq!(SlotIdentifier::new(7).to_string(), "SlotId(7)");
        assert_eq!(StudentIdentifier::new(12).to_string(), "StudentId(12)");
    }

    #[test]
    fn test_identifier_accessors_agree() {
        let id = ExamIdentifier::new(5);
        assert_eq!(*id.value(), 5);
        assert_eq!(id.get(), 5);
        assert_eq!(id.into_inner(), 5);
    }

    #[test]
    fn test_identifier_ordering_follows_inner_value() {
        let a = SlotIdentifier::new(1);
        let b = SlotIdentifier::new(2);
        assert!(a < b);
        assert_eq!(a, SlotIdentifier::new(1));
    }
}
