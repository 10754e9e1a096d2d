use std::cmp::Ordering;

use log::debug;
use serde::Serialize;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// AlignedPair – test and reference reduced to their common samples
// ---------------------------------------------------------------------------

/// Two datasets holding exactly the same keys.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub test: Dataset,
    pub reference: Dataset,
}

impl AlignedPair {
    /// Number of samples shared by both sides.
    pub fn len(&self) -> usize {
        self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.test.is_empty()
    }
}

/// Restrict each dataset to the keys also present in the other.
///
/// Both directions are needed: either side may hold samples the other lacks.
/// An empty intersection yields two empty datasets.
pub fn align(test: &Dataset, reference: &Dataset) -> AlignedPair {
    let test_aligned = test.retain_keys(|k| reference.contains_key(k));
    let reference_aligned = reference.retain_keys(|k| test_aligned.contains_key(k));

    debug!(
        "aligned {} ({} samples) with {} ({} samples): {} shared",
        test.name,
        test.len(),
        reference.name,
        reference.len(),
        test_aligned.len()
    );

    AlignedPair {
        test: test_aligned,
        reference: reference_aligned,
    }
}

// ---------------------------------------------------------------------------
// Coverage – how much of the test grid found a reference partner
// ---------------------------------------------------------------------------

/// Matched / unmatched test samples at one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyCoverage {
    pub frequency: f64,
    pub compared: usize,
    pub not_compared: usize,
}

impl FrequencyCoverage {
    /// Percentage of test samples that were compared.
    pub fn percent(&self) -> f64 {
        let total = self.compared + self.not_compared;
        if total == 0 {
            0.0
        } else {
            100.0 * self.compared as f64 / total as f64
        }
    }
}

/// Per-frequency coverage of the test dataset by the reference dataset,
/// ascending by frequency.
pub fn coverage(test: &Dataset, reference: &Dataset) -> Vec<FrequencyCoverage> {
    let mut out: Vec<FrequencyCoverage> = Vec::new();

    // Keys iterate in frequency order, so each frequency forms one run.
    for key in test.keys() {
        let matched = reference.contains_key(key);
        let freq = key.frequency();
        match out.last_mut() {
            Some(last) if last.frequency.total_cmp(&freq) == Ordering::Equal => {
                if matched {
                    last.compared += 1;
                } else {
                    last.not_compared += 1;
                }
            }
            _ => out.push(FrequencyCoverage {
                frequency: freq,
                compared: usize::from(matched),
                not_compared: usize::from(!matched),
            }),
        }
    }

    out
}
