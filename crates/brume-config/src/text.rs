//! The ordered configuration line sequence.
//!
//! [`ConfigText`] is generic over `std::io` endpoints so tests read from
//! byte slices and production code reads from files. It is mutated only
//! during preprocessing, before engine construction: preprocessing-phase
//! changes prepend directive lines, and interactive display directives
//! are force-disabled.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::normalize::{normalize, normalize_line};

/// An ordered sequence of configuration lines.
///
/// After [`normalize`](ConfigText::normalize) the invariants hold: no
/// leading or trailing blank lines, nothing at or after the terminator
/// directive, comments rendered as `"cmd # comment"`.
///
/// # Examples
///
/// ```
/// use brume_config::ConfigText;
///
/// let mut cfg = ConfigText::read(&b"species  red\ndifc red 3\n"[..]).unwrap();
/// cfg.normalize();
/// cfg.prepend("define K_1 10");
/// assert_eq!(cfg.lines()[0], "define K_1 10");
/// assert_eq!(cfg.lines()[1], "species red");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigText {
    lines: Vec<String>,
}

impl ConfigText {
    /// An empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an owned line sequence, as-is.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Read lines from any `Read` source.
    pub fn read<R: Read>(reader: R) -> io::Result<Self> {
        let lines = BufReader::new(reader)
            .lines()
            .collect::<io::Result<Vec<String>>>()?;
        Ok(Self { lines })
    }

    /// Read lines from a file path.
    pub fn read_path(path: &Path) -> io::Result<Self> {
        Self::read(File::open(path)?)
    }

    /// Write lines to any `Write` sink, one per line with a trailing
    /// newline each.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// Write lines to a file path, truncating any existing file.
    pub fn write_path(&self, path: &Path) -> io::Result<()> {
        self.write(BufWriter::new(File::create(path)?))
    }

    /// The current line sequence.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the text has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Canonicalize in place (see [`crate::normalize`]).
    pub fn normalize(&mut self) {
        self.lines = normalize(&self.lines);
    }

    /// Insert a directive line at the front of the text.
    ///
    /// Insertion order across multiple prepends is significant: the last
    /// prepended line ends up first. The line is canonicalized so the
    /// normalization invariants are preserved.
    pub fn prepend(&mut self, line: &str) {
        self.lines.insert(0, normalize_line(line));
    }

    /// Force-disable any directive that would open an interactive
    /// display: every `graphics <method>` command is rewritten to
    /// `graphics none`, comments preserved.
    pub fn disable_interactive(&mut self) {
        for line in &mut self.lines {
            let (cmd, comment) = match line.find('#') {
                Some(pos) => (line[..pos].trim_end(), Some(line[pos..].to_string())),
                None => (line.as_str(), None),
            };
            let mut tokens = cmd.split_whitespace();
            if tokens.next() == Some("graphics") && tokens.next().is_some() {
                *line = match comment {
                    Some(c) => format!("graphics none {c}"),
                    None => "graphics none".to_string(),
                };
            }
        }
    }
}

impl fmt::Display for ConfigText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
