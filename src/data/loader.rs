use std::path::Path;

use log::debug;

use super::model::{Row, BISTATIC_FIELDS, MONOSTATIC_FIELDS};
use crate::error::{Error, Result};

/// Default marker for comment lines.
pub const COMMENT_MARKER: char = '#';

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a plot file and parse its data rows.
///
/// The file is read in one piece; the path (as displayed) names the source in
/// any format error.
pub fn load_file(path: &Path, comment_marker: char) -> Result<Vec<Row>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&text, &path.display().to_string(), comment_marker)
}

// ---------------------------------------------------------------------------
// Text parser
// ---------------------------------------------------------------------------

/// Parse plot-file text into rows.
///
/// Layout, one sample per line, whitespace separated:
///
/// ```text
/// # freq theta phi pp_dB pp_phase tt_dB tt_phase
/// 1.0   0.0   0.0  -12.5  45.0    -13.1  40.0
/// # freq theta phi inc_theta inc_phi pp_dB pp_phase tt_dB tt_phase
/// 1.0   0.0   0.0  30.0      0.0     -12.5  45.0    -13.1  40.0
/// ```
///
/// Any line containing `comment_marker` is skipped, as are blank lines. The
/// first line with a field count other than 7 or 9, or with a token that is
/// not a number, aborts parsing. Rows keep file order.
pub fn parse_records(text: &str, source_name: &str, comment_marker: char) -> Result<Vec<Row>> {
    let mut rows = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.contains(comment_marker) || line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != MONOSTATIC_FIELDS && tokens.len() != BISTATIC_FIELDS {
            return Err(Error::format(
                source_name,
                line_no,
                line,
                format!(
                    "expected {MONOSTATIC_FIELDS} or {BISTATIC_FIELDS} fields, found {}",
                    tokens.len()
                ),
            ));
        }

        let values = tokens
            .iter()
            .map(|tok| {
                tok.parse::<f64>().map_err(|_| {
                    Error::format(source_name, line_no, line, format!("'{tok}' is not a number"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        rows.push(Row::new(line_no, values));
    }

    if rows.is_empty() {
        return Err(Error::NoData {
            source_name: source_name.to_string(),
        });
    }

    debug!("{source_name}: parsed {} rows", rows.len());
    Ok(rows)
}
