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
use crate::problem::{err::InstanceLoaderError, instance::Instance};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Parser for the plain-text instance format:
///
/// ```text
/// Number of students: 3
/// Number of exams: 2
/// Number of slots: 8
/// Number of rooms: 1
/// Room 0 capacity: 20
/// 0 0
/// 1 2
/// ```
///
/// Header attributes are positional; every remaining non-blank line is
/// one `<exam> <student>` enrolment. Counts are unsigned, so negative
/// values fail at integer parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceLoader;

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_bufread<R: BufRead>(&self, br: R) -> Result<Instance, InstanceLoaderError> {
        let mut lines = br.lines();

        let student_count = next_attribute(&mut lines, "Number of students")?;
        let exam_count = next_attribute(&mut lines, "Number of exams")?;
        let slot_count = next_attribute(&mut lines, "Number of slots")?;
        let room_count = next_attribute(&mut lines, "Number of rooms")?;

        let mut room_capacities = Vec::with_capacity(room_count);
        for r in 0..room_count {
            let cap = next_attribute(&mut lines, &format!("Room {} capacity", r))?;
            room_capacities.push(cap as u32);
        }

        let mut enrolments = Vec::new();
        for line in lines {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            enrolments.push(parse_enrolment(trimmed)?);
        }

        Ok(Instance::new(
            student_count,
            exam_count,
            slot_count,
            room_count,
            room_capacities,
            enrolments,
        )?)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Instance, InstanceLoaderError> {
        let file = File::open(path).map_err(InstanceLoaderError::Io)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance, InstanceLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

fn next_attribute<I>(lines: &mut I, name: &str) -> Result<usize, InstanceLoaderError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let line = lines.next().ok_or(InstanceLoaderError::UnexpectedEof)??;
    parse_attribute(&line, name)
}

fn parse_attribute(line: &str, name: &str) -> Result<usize, InstanceLoaderError> {
    let rest = line
        .trim()
        .strip_prefix(name)
        .and_then(|r| r.strip_prefix(':'))
        .ok_or_else(|| InstanceLoaderError::InvalidHeader {
            expected: name.to_string(),
            line: line.to_string(),
        })?;
    Ok(rest.trim().parse::<usize>()?)
}

fn parse_enrolment(line: &str) -> Result<(ExamIdentifier, StudentIdentifier), InstanceLoaderError> {
    let mut tokens = line.split_whitespace();
    let (Some(exam), Some(student), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(InstanceLoaderError::InvalidEnrolment {
            line: line.to_string(),
        });
    };
    Ok((
        ExamIdentifier::new(exam.parse::<usize>()?),
        StudentIdentifier::new(student.parse::<usize>()?),
    ))
}
