use std::cmp::Ordering;

use num_complex::Complex64;

use crate::data::align::AlignedPair;
use crate::data::model::SampleKey;

// ---------------------------------------------------------------------------
// FrequencyGroup – parallel amplitude sequences at one frequency
// ---------------------------------------------------------------------------

/// Samples of an aligned pair sharing one frequency.
///
/// All four sequences are built from `keys`, so index `i` in each refers to
/// the same physical sample.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGroup {
    pub frequency: f64,
    pub keys: Vec<SampleKey>,
    pub pp_test: Vec<Complex64>,
    pub pp_ref: Vec<Complex64>,
    pub tt_test: Vec<Complex64>,
    pub tt_ref: Vec<Complex64>,
}

impl FrequencyGroup {
    fn new(frequency: f64) -> Self {
        Self {
            frequency,
            keys: Vec::new(),
            pp_test: Vec::new(),
            pp_ref: Vec::new(),
            tt_test: Vec::new(),
            tt_ref: Vec::new(),
        }
    }

    /// Number of samples in the group.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Split an aligned pair into one group per distinct frequency, ascending.
pub fn group_by_frequency(pair: &AlignedPair) -> Vec<FrequencyGroup> {
    let mut groups: Vec<FrequencyGroup> = Vec::new();

    for freq in pair.reference.frequencies() {
        let mut group = FrequencyGroup::new(freq);
        group.keys = pair
            .reference
            .keys()
            .filter(|k| k.frequency().total_cmp(&freq) == Ordering::Equal)
            .filter(|k| pair.test.contains_key(k))
            .copied()
            .collect();

        for key in &group.keys {
            if let (Some(t), Some(r)) = (pair.test.get(key), pair.reference.get(key)) {
                group.pp_test.push(t.pp);
                group.tt_test.push(t.tt);
                group.pp_ref.push(r.pp);
                group.tt_ref.push(r.tt);
            }
        }

        if !group.is_empty() {
            groups.push(group);
        }
    }

    groups
}
