use std::slice;

use crate::record::SignatureRecord;
use crate::report::RecordReport;
use crate::verifier::Verifier;

/// Lazy iterator of per-record reports.
///
/// Records are checked one at a time as the iterator advances. A failing
/// record yields a report with its failure set and iteration continues.
/// Call [`Verifier::verify_batch`] again for a fresh pass.
#[derive(Clone, Debug)]
pub struct BatchIter<'a> {
    verifier: &'a Verifier,
    records: slice::Iter<'a, SignatureRecord>,
}

impl<'a> BatchIter<'a> {
    pub(crate) fn new(verifier: &'a Verifier, records: &'a [SignatureRecord]) -> Self {
        BatchIter {
            verifier,
            records: records.iter(),
        }
    }
}

impl Iterator for BatchIter<'_> {
    type Item = RecordReport;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|record| self.verifier.verify_record(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for BatchIter<'_> {}

impl DoubleEndedIterator for BatchIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.records
            .next_back()
            .map(|record| self.verifier.verify_record(record))
    }
}
