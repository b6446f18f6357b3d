//! Test utilities and a scripted mock engine for brume development.
//!
//! [`ScriptedEngine`] implements the engine collaborator traits without
//! any physics: construction reads the configuration file, runs
//! synthesize deterministic whitespace-columnar output files from a
//! seeded ChaCha8 RNG, and every call is recorded in an event log that
//! tests can inspect after the executor has consumed the handle.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use brume_core::{CommandTiming, Engine, EngineError, EngineHandle, RunWindow};

/// Everything a scripted handle was asked to do, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Construction succeeded; carries the configuration as read.
    Constructed {
        path: PathBuf,
        lines: Vec<String>,
    },
    OutputFile {
        name: String,
        append: bool,
    },
    Command {
        text: String,
        timing: CommandTiming,
    },
    Graphics(String),
    Seed(u64),
    TimeStep(f64),
    Accuracy(f64),
    Run {
        window: RunWindow,
        overwrite: bool,
        display: bool,
    },
}

/// A scripted engine: deterministic synthetic output, full call log.
///
/// Constructed handles share the engine's log through an `Arc`, so a
/// test can hand the engine to an executor by value or reference and
/// still inspect every call afterwards.
pub struct ScriptedEngine {
    seed: u64,
    reject_construct: Option<String>,
    log: Arc<Mutex<Vec<Event>>>,
}

impl ScriptedEngine {
    /// A scripted engine whose synthetic output derives from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            reject_construct: None,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every construction fail with the given diagnostic.
    pub fn rejecting(seed: u64, detail: impl Into<String>) -> Self {
        Self {
            reject_construct: Some(detail.into()),
            ..Self::new(seed)
        }
    }

    /// Snapshot of the event log.
    pub fn events(&self) -> Vec<Event> {
        self.log.lock().unwrap().clone()
    }

    /// All queued commands, in call order.
    pub fn commands(&self) -> Vec<(String, CommandTiming)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Command { text, timing } => Some((text, timing)),
                _ => None,
            })
            .collect()
    }

    /// The configuration lines read at the most recent construction.
    pub fn constructed_lines(&self) -> Option<Vec<String>> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Constructed { lines, .. } => Some(lines),
            _ => None,
        })
    }
}

impl Engine for ScriptedEngine {
    type Handle = ScriptedHandle;

    fn construct(&self, path: &Path) -> Result<Self::Handle, EngineError> {
        if let Some(detail) = &self.reject_construct {
            return Err(EngineError::Construct {
                detail: detail.clone(),
            });
        }
        let file = File::open(path).map_err(|e| EngineError::Construct {
            detail: format!("cannot open configuration: {e}"),
        })?;
        let lines: Vec<String> = BufReader::new(file)
            .lines()
            .collect::<std::io::Result<_>>()
            .map_err(|e| EngineError::Construct {
                detail: format!("cannot read configuration: {e}"),
            })?;

        let mut species = Vec::new();
        for line in &lines {
            let mut tokens = line.split_whitespace();
            if tokens.next() == Some("species") {
                for name in tokens {
                    if name == "#" {
                        break;
                    }
                    species.push(name.to_string());
                }
            }
        }

        let dir = path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        self.log.lock().unwrap().push(Event::Constructed {
            path: path.to_path_buf(),
            lines,
        });
        Ok(ScriptedHandle {
            dir,
            species,
            seed: self.seed,
            outputs: Vec::new(),
            scheduled: Vec::new(),
            killed: HashSet::new(),
            fixed: HashMap::new(),
            log: Arc::clone(&self.log),
        })
    }
}

/// A live scripted instance.
pub struct ScriptedHandle {
    dir: PathBuf,
    species: Vec<String>,
    seed: u64,
    outputs: Vec<String>,
    scheduled: Vec<(String, CommandTiming)>,
    killed: HashSet<String>,
    fixed: HashMap<String, u64>,
    log: Arc<Mutex<Vec<Event>>>,
}

impl ScriptedHandle {
    fn record(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }

    /// Apply an immediate command to the scripted molecule state.
    fn apply_immediate(&mut self, text: &str) {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some(&keyword) = tokens.first() else {
            return;
        };
        if keyword.starts_with("killmol") {
            if let Some(&species) = tokens.get(1) {
                self.killed.insert(species.to_string());
            }
        } else if keyword.starts_with("fixmolcount") {
            if let (Some(&species), Some(count)) =
                (tokens.get(1), tokens.get(2).and_then(|t| t.parse().ok()))
            {
                self.fixed.insert(species.to_string(), count);
            }
        }
    }

    fn write_outputs(&self, window: RunWindow, overwrite: bool) -> Result<(), EngineError> {
        let steps = ((window.stop - window.start) / window.step).round() as usize;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        // Base counts per species, then a bounded walk per step.
        let mut counts: Vec<u64> = self
            .species
            .iter()
            .map(|_| 10 + (rng.gen::<f64>() * 90.0) as u64)
            .collect();

        for name in &self.outputs {
            let path = self.dir.join(name);
            let file = if overwrite {
                File::create(&path)?
            } else {
                std::fs::OpenOptions::new().append(true).create(true).open(&path)?
            };
            let mut w = BufWriter::new(file);

            let headers: Vec<&str> = self
                .scheduled
                .iter()
                .filter(|(text, timing)| {
                    *timing == CommandTiming::BeforeFirstStep && last_token(text) == name
                })
                .map(|(text, _)| text.as_str())
                .collect();
            let data: Vec<&str> = self
                .scheduled
                .iter()
                .filter(|(text, timing)| {
                    *timing == CommandTiming::EveryStep && last_token(text) == name
                })
                .map(|(text, _)| text.as_str())
                .collect();

            for text in headers {
                if first_token(text).ends_with("header") {
                    write!(w, "time")?;
                    for sp in &self.species {
                        write!(w, " {sp}")?;
                    }
                    writeln!(w)?;
                }
            }

            for i in 0..=steps {
                let t = window.start + i as f64 * window.step;
                for (s, count) in counts.iter_mut().enumerate() {
                    let delta = (rng.gen::<f64>() * 7.0) as i64 - 3;
                    *count = count.saturating_add_signed(delta);
                    let sp = &self.species[s];
                    if self.killed.contains(sp) {
                        *count = 0;
                    } else if let Some(fixed) = self.fixed.get(sp) {
                        *count = *fixed;
                    }
                }
                for text in &data {
                    self.write_row(&mut w, text, t, &counts, &mut rng)?;
                }
            }
            w.flush()?;
        }
        Ok(())
    }

    fn write_row(
        &self,
        w: &mut impl Write,
        command: &str,
        t: f64,
        counts: &[u64],
        rng: &mut ChaCha8Rng,
    ) -> Result<(), EngineError> {
        let tokens: Vec<&str> = command.split_whitespace().collect();
        let keyword = tokens[0];
        if keyword.starts_with("molcountspace2d") {
            // <kw> <sp> <axis> <low1> <high1> <bins1> <low2> <high2> <bins2> ...
            let cols: usize = tokens.get(5).and_then(|s| s.parse().ok()).unwrap_or(4);
            let rows: usize = tokens.get(8).and_then(|s| s.parse().ok()).unwrap_or(4);
            writeln!(w, "{t}")?;
            for _ in 0..rows {
                for c in 0..cols {
                    if c > 0 {
                        write!(w, " ")?;
                    }
                    write!(w, "{}", (rng.gen::<f64>() * 20.0) as u64)?;
                }
                writeln!(w)?;
            }
        } else if keyword.starts_with("molcountspace") {
            let bins: usize = tokens.get(5).and_then(|s| s.parse().ok()).unwrap_or(10);
            write!(w, "{t}")?;
            for _ in 0..bins {
                write!(w, " {}", (rng.gen::<f64>() * 20.0) as u64)?;
            }
            writeln!(w)?;
        } else if keyword == "molpos" || keyword == "trackmol" {
            write!(w, "{t}")?;
            for _ in 0..2 {
                for _ in 0..3 {
                    write!(w, " {:.4}", rng.gen::<f64>() * 100.0)?;
                }
            }
            writeln!(w)?;
        } else {
            // Scalar counting family: one column per species.
            write!(w, "{t}")?;
            for count in counts {
                write!(w, " {count}")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

impl EngineHandle for ScriptedHandle {
    fn set_output_file(&mut self, name: &str, append: bool) -> Result<(), EngineError> {
        self.record(Event::OutputFile {
            name: name.to_string(),
            append,
        });
        self.outputs.push(name.to_string());
        Ok(())
    }

    fn add_command(&mut self, text: &str, timing: CommandTiming) -> Result<(), EngineError> {
        self.record(Event::Command {
            text: text.to_string(),
            timing,
        });
        if timing == CommandTiming::Immediate {
            self.apply_immediate(text);
        } else {
            self.scheduled.push((text.to_string(), timing));
        }
        Ok(())
    }

    fn set_graphics(&mut self, method: &str) -> Result<(), EngineError> {
        self.record(Event::Graphics(method.to_string()));
        Ok(())
    }

    fn set_seed(&mut self, seed: u64) -> Result<(), EngineError> {
        self.record(Event::Seed(seed));
        self.seed = seed;
        Ok(())
    }

    fn set_time_step(&mut self, dt: f64) -> Result<(), EngineError> {
        self.record(Event::TimeStep(dt));
        Ok(())
    }

    fn set_accuracy(&mut self, accuracy: f64) -> Result<(), EngineError> {
        self.record(Event::Accuracy(accuracy));
        Ok(())
    }

    fn run(
        &mut self,
        window: RunWindow,
        overwrite: bool,
        display: bool,
    ) -> Result<(), EngineError> {
        self.record(Event::Run {
            window,
            overwrite,
            display,
        });
        self.write_outputs(window, overwrite)
    }
}

fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

fn last_token(text: &str) -> &str {
    text.split_whitespace().last().unwrap_or("")
}
