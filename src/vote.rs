use std::collections::HashMap;

use crate::error::{KnnError, Result};
use crate::instance::Label;

/// Majority vote over neighbor labels given nearest-first.
///
/// Counts are kept per distinct label, so any label value is valid regardless
/// of how many neighbors vote. When several labels share the highest count the
/// one that appears first in `labels` (the nearer neighbor) wins.
///
/// # Errors
///
/// Returns [`KnnError::EmptyInput`] if `labels` is empty.
pub fn majority_vote(labels: &[Label]) -> Result<Label> {
    let mut counts = HashMap::<Label, usize>::with_capacity(labels.len());
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut best: Option<(Label, usize)> = None;
    for &label in labels {
        let count = counts[&label];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label).ok_or(KnnError::EmptyInput)
}
