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

use crate::{
    candidates::CandidateSet, config::SchedulingRules, err::StructurallyInfeasibleError,
};
use exam_timetable_model::common::ExamIdentifier;
use exam_timetable_model::problem::{incidence::IncidenceIndex, instance::Instance};

/// Everything the search needs, derived once at solve start and
/// discarded at solve end: incidence, per-exam invigilator demand and
/// the candidate sets.
#[derive(Debug, Clone)]
pub struct SolverModel<'i> {
    instance: &'i Instance,
    rules: SchedulingRules,
    incidence: IncidenceIndex,
    candidates: CandidateSet,
    examiner_demand: Vec<u32>,
}

impl<'i> SolverModel<'i> {
    /// Fails with the offending exam when any candidate list is empty;
    /// the search must not start in that case.
    pub fn build(
        instance: &'i Instance,
        rules: SchedulingRules,
    ) -> Result<Self, StructurallyInfeasibleError> {
        let incidence = IncidenceIndex::from_instance(instance);
        let candidates = CandidateSet::generate(instance, &incidence, &rules);

        if let Some(exam) = candidates.first_unplaceable() {
            return Err(StructurallyInfeasibleError::new(exam));
        }

        let examiner_demand = incidence
            .exam_sizes()
            .iter()
            .map(|&size| if size >= rules.large_exam_threshold { 3 } else { 2 })
            .collect();

        Ok(Self {
            instance,
            rules,
            incidence,
            candidates,
            examiner_demand,
        })
    }

    #[inline]
    pub fn instance(&self) -> &Instance {
        self.instance
    }

    #[inline]
    pub fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    #[inline]
    pub fn incidence(&self) -> &IncidenceIndex {
        &self.incidence
    }

    #[inline]
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[inline]
    pub fn exam_count(&self) -> usize {
        self.instance.exam_count()
    }

    #[inline]
    pub fn examiner_demand(&self, exam: ExamIdentifier) -> u32 {
        self.examiner_demand[exam.get()]
    }

    #[inline]
    pub fn examiner_demands(&self) -> &[u32] {
        &self.examiner_demand
    }

    #[inline]
    pub fn is_large(&self, exam: ExamIdentifier) -> bool {
        self.incidence.exam_size(exam) >= self.rules.large_exam_threshold
    }
}
