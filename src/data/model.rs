use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_complex::Complex64;
use serde::Serialize;

/// Field count of a monostatic row.
pub const MONOSTATIC_FIELDS: usize = 7;
/// Field count of a bistatic row (adds the incidence direction).
pub const BISTATIC_FIELDS: usize = 9;

// ---------------------------------------------------------------------------
// Row – one parsed line of a plot file
// ---------------------------------------------------------------------------

/// The numeric fields of one data line, in file order.
///
/// * 7 fields: `freq theta phi pp_dB pp_phase tt_dB tt_phase`
/// * 9 fields: `freq theta phi inc_theta inc_phi pp_dB pp_phase tt_dB tt_phase`
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based line number in the source text.
    pub line_no: usize,
    pub values: Vec<f64>,
}

impl Row {
    pub fn new(line_no: usize, values: Vec<f64>) -> Self {
        Self { line_no, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SampleKey – the coordinates identifying one physical measurement
// ---------------------------------------------------------------------------

/// `(frequency, theta, phi)` for monostatic samples, plus the incidence
/// direction for bistatic ones.
///
/// Equality, hashing and ordering are exact on the stored coordinates, which
/// are canonicalised on construction so `-0.0 == 0.0`. Keys of different
/// shapes never compare equal. Ordering is by frequency first, so iterating a
/// [`Dataset`] walks frequencies in ascending order.
#[derive(Debug, Clone, Copy)]
pub struct SampleKey {
    coords: [f64; 5],
    bistatic: bool,
}

fn canonical(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else {
        // Folds -0.0 into 0.0.
        v + 0.0
    }
}

impl SampleKey {
    pub fn monostatic(frequency: f64, theta: f64, phi: f64) -> Self {
        Self {
            coords: [canonical(frequency), canonical(theta), canonical(phi), 0.0, 0.0],
            bistatic: false,
        }
    }

    pub fn bistatic(
        frequency: f64,
        theta: f64,
        phi: f64,
        incidence_theta: f64,
        incidence_phi: f64,
    ) -> Self {
        Self {
            coords: [
                canonical(frequency),
                canonical(theta),
                canonical(phi),
                canonical(incidence_theta),
                canonical(incidence_phi),
            ],
            bistatic: true,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.coords[0]
    }

    pub fn theta(&self) -> f64 {
        self.coords[1]
    }

    pub fn phi(&self) -> f64 {
        self.coords[2]
    }

    /// Incidence `(theta, phi)` for bistatic keys.
    pub fn incidence(&self) -> Option<(f64, f64)> {
        self.bistatic.then(|| (self.coords[3], self.coords[4]))
    }

    pub fn is_bistatic(&self) -> bool {
        self.bistatic
    }

    /// The coordinates that take part in the key (3 or 5 of them).
    pub fn coordinates(&self) -> &[f64] {
        if self.bistatic {
            &self.coords
        } else {
            &self.coords[..3]
        }
    }

    /// Round every coordinate to `decimals` decimal places.
    pub fn quantized(&self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        let mut coords = self.coords;
        for c in &mut coords {
            *c = canonical((*c * scale).round() / scale);
        }
        Self {
            coords,
            bistatic: self.bistatic,
        }
    }
}

impl PartialEq for SampleKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SampleKey {}

impl PartialOrd for SampleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SampleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frequency()
            .total_cmp(&other.frequency())
            .then(self.bistatic.cmp(&other.bistatic))
            .then_with(|| {
                self.coords[1..]
                    .iter()
                    .zip(&other.coords[1..])
                    .map(|(a, b)| a.total_cmp(b))
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            })
    }
}

impl Hash for SampleKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bistatic.hash(state);
        for c in &self.coords {
            c.to_bits().hash(state);
        }
    }
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.incidence() {
            Some((it, ip)) => write!(
                f,
                "(f={}, theta={}, phi={}, inc_theta={it}, inc_phi={ip})",
                self.frequency(),
                self.theta(),
                self.phi()
            ),
            None => write!(
                f,
                "(f={}, theta={}, phi={})",
                self.frequency(),
                self.theta(),
                self.phi()
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// AmplitudePair – phi-phi and theta-theta scattering amplitudes
// ---------------------------------------------------------------------------

/// Complex scattering amplitudes of the two polarization channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmplitudePair {
    pub pp: Complex64,
    pub tt: Complex64,
}

// ---------------------------------------------------------------------------
// Dataset – all samples of one plot file
// ---------------------------------------------------------------------------

/// Samples of one plot file keyed by their coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// File name or other label used in diagnostics.
    pub name: String,
    samples: BTreeMap<SampleKey, AmplitudePair>,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: BTreeMap::new(),
        }
    }

    /// Insert a sample, returning the value it replaced (if the key repeats).
    pub fn insert(&mut self, key: SampleKey, value: AmplitudePair) -> Option<AmplitudePair> {
        self.samples.insert(key, value)
    }

    pub fn get(&self, key: &SampleKey) -> Option<&AmplitudePair> {
        self.samples.get(key)
    }

    pub fn contains_key(&self, key: &SampleKey) -> bool {
        self.samples.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &SampleKey> {
        self.samples.keys()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct frequencies, ascending.
    pub fn frequencies(&self) -> Vec<f64> {
        let mut freqs: Vec<f64> = self.samples.keys().map(SampleKey::frequency).collect();
        freqs.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
        freqs
    }

    /// Copy of this dataset keeping only the keys accepted by `keep`.
    pub fn retain_keys<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&SampleKey) -> bool,
    {
        Self {
            name: self.name.clone(),
            samples: self
                .samples
                .iter()
                .filter(|(k, _)| keep(k))
                .map(|(k, v)| (*k, *v))
                .collect(),
        }
    }
}
