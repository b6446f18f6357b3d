//! Benchmark fixtures for the brume experiment bridge.
//!
//! Provides synthetic configuration text and engine output in the sizes the
//! bench targets exercise:
//!
//! - [`make_config_text`]: a model file with `n` species and typical clutter
//!   (comments, ragged whitespace, a terminator with trailing junk)
//! - [`make_scalar_output`]: a headered count table with `steps` rows
//! - [`make_grid_output`]: positional grid blocks, `steps` blocks of
//!   `rows` data rows each

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt::Write;

/// Build raw configuration text with `n` species declarations.
///
/// Every third line carries an inline comment and uneven indentation so the
/// normalizer has real work to do.
pub fn make_config_text(n: usize) -> String {
    let mut text = String::from("# synthetic model\ndim 3\n");
    for i in 0..n {
        if i % 3 == 0 {
            let _ = writeln!(text, "  species   sp{i}   # species {i}");
        } else {
            let _ = writeln!(text, "species sp{i}");
        }
        let _ = writeln!(text, "difc sp{i} 0.{}", (i % 9) + 1);
    }
    text.push_str("graphics opengl\nend_file\n\nleftover notes after the end\n");
    text
}

/// Build a headered scalar count table: `time` plus `species` columns,
/// `steps` evenly spaced rows.
pub fn make_scalar_output(species: usize, steps: usize) -> String {
    let mut text = String::from("time");
    for i in 0..species {
        let _ = write!(text, " sp{i}");
    }
    text.push('\n');
    for step in 0..steps {
        let _ = write!(text, "{}", step as f64 * 0.01);
        for i in 0..species {
            let _ = write!(text, " {}", 10 + (step + i) % 90);
        }
        text.push('\n');
    }
    text
}

/// Build positional grid output: `steps` blocks, each a time separator line
/// followed by `rows` lines of `cols` counts.
pub fn make_grid_output(steps: usize, rows: usize, cols: usize) -> String {
    let mut text = String::new();
    for step in 0..steps {
        let _ = writeln!(text, "{}", step as f64 * 0.01);
        for r in 0..rows {
            for c in 0..cols {
                if c > 0 {
                    text.push(' ');
                }
                let _ = write!(text, "{}", (step + r * cols + c) % 17);
            }
            text.push('\n');
        }
    }
    text
}
