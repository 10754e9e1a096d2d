//! Row → keyed complex amplitude conversion.

use std::f64::consts::PI;

use log::debug;
use num_complex::Complex64;

use super::model::{AmplitudePair, Dataset, Row, SampleKey, BISTATIC_FIELDS, MONOSTATIC_FIELDS};
use crate::error::{Error, Result};

/// Complex scattering amplitude from an RCS value in dB and a phase in degrees:
/// `sqrt(10^(dB/10) / 4π) · e^(i·phase)`.
pub fn amplitude(db: f64, phase_deg: f64) -> Complex64 {
    let rcs = 10f64.powf(db / 10.0);
    let magnitude = (rcs / (4.0 * PI)).sqrt();
    Complex64::from_polar(magnitude, phase_deg.to_radians())
}

/// Key and amplitudes for one row.
///
/// `source_name` is only used to label the error for a row of the wrong length.
pub fn transform_row(row: &Row, source_name: &str) -> Result<(SampleKey, AmplitudePair)> {
    let v = &row.values;
    let (key, fields) = match v.len() {
        MONOSTATIC_FIELDS => (SampleKey::monostatic(v[0], v[1], v[2]), &v[3..]),
        BISTATIC_FIELDS => (SampleKey::bistatic(v[0], v[1], v[2], v[3], v[4]), &v[5..]),
        n => {
            let line = v.iter().map(f64::to_string).collect::<Vec<_>>().join(" ");
            return Err(Error::format(
                source_name,
                row.line_no,
                &line,
                format!("expected {MONOSTATIC_FIELDS} or {BISTATIC_FIELDS} fields, found {n}"),
            ));
        }
    };

    let pair = AmplitudePair {
        pp: amplitude(fields[0], fields[1]),
        tt: amplitude(fields[2], fields[3]),
    };
    Ok((key, pair))
}

/// Build the dataset for one file.
///
/// With `key_decimals` set, key coordinates are rounded before insertion so
/// that grids written with slightly different float formatting still line up.
/// A repeated key replaces the earlier sample.
pub fn build_dataset(rows: &[Row], source_name: &str, key_decimals: Option<u32>) -> Result<Dataset> {
    let mut dataset = Dataset::new(source_name);
    for row in rows {
        let (key, pair) = transform_row(row, source_name)?;
        let key = match key_decimals {
            Some(d) => key.quantized(d),
            None => key,
        };
        if dataset.insert(key, pair).is_some() {
            debug!("{source_name}: line {} repeats sample {key}", row.line_no);
        }
    }
    debug!("{source_name}: {} distinct samples", dataset.len());
    Ok(dataset)
}
