//! Column formatting for printing tree contents.

use std::io::{self, Write};

use itertools::Itertools;

/// How values are laid out when printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Values per row.
    pub columns: usize,
    /// Width each value is right-aligned to.
    pub width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            width: 6,
        }
    }
}

/// Writes `values` right-aligned in rows of `config.columns`, ending every row with a newline.
/// Returns the number of rows written; nothing is written for an empty sequence.
///
/// # Examples
///
/// ```
/// use intbst::display::{write_rows, DisplayConfig};
///
/// let mut out = Vec::new();
/// let rows = write_rows(&mut out, 1..=12, &DisplayConfig::default()).unwrap();
///
/// assert_eq!(rows, 2);
/// assert_eq!(String::from_utf8(out).unwrap().lines().nth(1), Some("    11    12"));
/// ```
pub fn write_rows<W, I>(out: &mut W, values: I, config: &DisplayConfig) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = i32>,
{
    let width = config.width;
    let mut rows = 0;
    for row in &values.into_iter().chunks(config.columns.max(1)) {
        for value in row {
            write!(out, "{value:>width$}")?;
        }
        writeln!(out)?;
        rows += 1;
    }
    Ok(rows)
}
