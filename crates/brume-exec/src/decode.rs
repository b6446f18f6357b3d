//! Decoding of engine output files.
//!
//! Output files are whitespace-separated columnar text, one row per
//! output step, with an optional header row of column names. Grid
//! observables are the exception: they repeat a block of `rows + 1`
//! lines per step (a separator line, then `rows` data rows), and blocks
//! are detected purely by line position, never by content.
//!
//! Because output files accumulate rows across chained runs sharing
//! engine state, every decoder here takes a `keep` count and retains
//! only the trailing rows (or blocks) of the file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use brume_core::ResultArray;

/// A decoded columnar output table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Column names, when the file carries a header row.
    pub header: Option<Vec<String>>,
    /// Numeric data rows, in file order.
    pub rows: Vec<Vec<f64>>,
}

/// A cached decoding of one output file, keyed by output command.
///
/// Column-sliced families share a [`Table`]; the grid family keeps raw
/// lines because its reshape is positional.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedOutput {
    /// Parsed columnar table.
    Table(Table),
    /// Raw lines for positional block reshaping.
    Lines(Vec<String>),
}

/// Read every line of an output file.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    BufReader::new(File::open(path)?).lines().collect()
}

/// Parse columnar lines into a [`Table`].
///
/// Blank lines are skipped. With `include_header`, the first
/// non-numeric row becomes the header and any repeated header rows from
/// chained runs are dropped; without it, a non-numeric row is a decode
/// failure described by the returned message.
pub fn parse_table(lines: &[String], include_header: bool) -> Result<Table, String> {
    let mut table = Table::default();
    for (lineno, line) in lines.iter().enumerate() {
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.is_empty() {
            continue;
        }
        match parse_row(&cells) {
            Some(row) => table.rows.push(row),
            None if include_header => {
                if table.header.is_none() {
                    table.header = Some(cells.iter().map(|c| c.to_string()).collect());
                }
            }
            None => {
                return Err(format!("non-numeric cell on line {}", lineno + 1));
            }
        }
    }
    Ok(table)
}

fn parse_row(cells: &[&str]) -> Option<Vec<f64>> {
    cells.iter().map(|c| c.parse::<f64>().ok()).collect()
}

/// Slice the column named `name`, keeping the trailing `keep` rows.
///
/// Returns an empty series when the table has no such column (or no
/// header at all); the caller escalates empties as missing results.
pub fn series_tail(table: &Table, name: &str, keep: usize) -> Vec<f64> {
    let Some(header) = &table.header else {
        return Vec::new();
    };
    let Some(col) = header.iter().position(|h| h == name) else {
        return Vec::new();
    };
    tail(&table.rows, keep)
        .iter()
        .filter_map(|row| row.get(col).copied())
        .collect()
}

/// Slice all non-time columns as a matrix, keeping the trailing `keep`
/// rows.
///
/// The first column of each row is the time column and is dropped. Rows
/// of uneven width are right-padded with zeros to the widest row.
pub fn matrix_tail(table: &Table, keep: usize) -> ResultArray {
    let rows = tail(&table.rows, keep);
    let cols = rows
        .iter()
        .map(|r| r.len().saturating_sub(1))
        .max()
        .unwrap_or(0);
    if cols == 0 {
        return ResultArray::Matrix {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        };
    }
    let mut data = Vec::with_capacity(rows.len() * cols);
    for row in rows {
        for i in 0..cols {
            data.push(row.get(i + 1).copied().unwrap_or(0.0));
        }
    }
    ResultArray::Matrix {
        rows: rows.len(),
        cols,
        data,
    }
}

/// Reshape grid output into a `(steps, rows, cols)` stack, keeping the
/// trailing `keep` steps.
///
/// Each block of `rows + 1` lines is one time step: line 0 of the block
/// is a separator, lines 1..=rows carry `cols` values each. Blocks are
/// cut by position modulo `rows + 1`; a trailing partial block is
/// ignored.
pub fn grid_tail(
    lines: &[String],
    shape: (usize, usize),
    keep: usize,
) -> Result<ResultArray, String> {
    let (rows, cols) = shape;
    let block_len = rows + 1;
    let total_steps = lines.len() / block_len;
    let first = total_steps.saturating_sub(keep);

    let steps = total_steps - first;
    let mut data = Vec::with_capacity(steps * rows * cols);
    for step in first..total_steps {
        let block = &lines[step * block_len..(step + 1) * block_len];
        for (r, line) in block[1..].iter().enumerate() {
            let cells: Vec<&str> = line.split_whitespace().collect();
            let row = parse_row(&cells).ok_or_else(|| {
                format!("non-numeric grid cell in step {step}, row {r}")
            })?;
            if row.len() != cols {
                return Err(format!(
                    "grid row has {} values, expected {cols} (step {step}, row {r})",
                    row.len(),
                ));
            }
            data.extend_from_slice(&row);
        }
    }
    Ok(ResultArray::Grid {
        steps,
        rows,
        cols,
        data,
    })
}

fn tail<T>(rows: &[T], keep: usize) -> &[T] {
    let first = rows.len().saturating_sub(keep);
    &rows[first..]
}
