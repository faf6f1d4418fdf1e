// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

/// One precomputed trajectory and the key it was generated from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRow {
    /// Starting value (or any caller-chosen key) for this row.
    pub key: u64,
    /// The trajectory, in generation order.
    pub values: Vec<u64>,
}

/// Read-only table of input sequences, addressed by row index.
///
/// The table is supplied externally and never mutated by the viewers; they
/// only slice it with [`SequenceTable::select`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceTable {
    rows: Vec<SequenceRow>,
}

impl SequenceTable {
    /// Creates a table from already-built rows.
    #[must_use]
    pub fn new(rows: Vec<SequenceRow>) -> Self {
        Self { rows }
    }

    /// Creates a table from bare sequences, keyed by their position.
    pub fn from_sequences<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = Vec<u64>>,
    {
        let rows = sequences
            .into_iter()
            .zip(0_u64..)
            .map(|(values, key)| SequenceRow { key, values })
            .collect();
        Self { rows }
    }

    /// Parses the text table format shipped with the visualization.
    ///
    /// The expected shape is a header line (`n,seq`) followed by rows such as
    /// `3,"3, 10, 5, 16, 8, 4, 2, 1"`. The quoted list may also be a single
    /// unquoted value. Blank lines are skipped. A first line that does not
    /// start with a digit is treated as the header.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut rows = Vec::new();
        let mut seen_content = false;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if !seen_content {
                seen_content = true;
                if !line.starts_with(|c: char| c.is_ascii_digit()) {
                    continue;
                }
            }
            rows.push(parse_row(line, line_no)?);
        }

        Ok(Self { rows })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SequenceRow> {
        self.rows.get(index)
    }

    /// Returns all rows.
    #[must_use]
    pub fn rows(&self) -> &[SequenceRow] {
        &self.rows
    }

    /// Returns the rows in `[range.start, range.end)`.
    ///
    /// The range is clamped to the table. Inverted or fully out-of-bounds
    /// ranges select nothing.
    #[must_use]
    pub fn select(&self, range: Range<usize>) -> &[SequenceRow] {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        &self.rows[start..end]
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<SequenceRow, ParseError> {
    let err = |kind| ParseError {
        line: line_no,
        kind,
    };

    let (key, rest) = line
        .split_once(',')
        .ok_or(err(ParseErrorKind::MissingColumn))?;
    let key = key
        .trim()
        .parse::<u64>()
        .map_err(|_| err(ParseErrorKind::InvalidInteger))?;

    let rest = rest.trim();
    let list = rest
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(rest)
        .trim();

    let mut values = Vec::new();
    if !list.is_empty() {
        for item in list.split(',') {
            let value = item
                .trim()
                .parse::<u64>()
                .map_err(|_| err(ParseErrorKind::InvalidInteger))?;
            if value == 0 {
                return Err(err(ParseErrorKind::NonPositive));
            }
            values.push(value);
        }
    }

    Ok(SequenceRow { key, values })
}

/// What went wrong on a line of a sequence table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The row has no sequence column.
    MissingColumn,
    /// A key or sequence value is not an unsigned integer.
    InvalidInteger,
    /// A sequence value is zero; trajectories hold positive integers.
    NonPositive,
}

/// Error returned by [`SequenceTable::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number of the offending row.
    pub line: usize,
    /// Failure kind.
    pub kind: ParseErrorKind,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ParseErrorKind::MissingColumn => "missing sequence column",
            ParseErrorKind::InvalidInteger => "invalid integer",
            ParseErrorKind::NonPositive => "sequence values must be positive",
        };
        write!(f, "line {}: {}", self.line, what)
    }
}

impl core::error::Error for ParseError {}
