//! Descriptive model extraction from normalized configuration text.
//!
//! [`ConfigModel::extract`] walks the lines of a normalized
//! [`ConfigText`](crate::ConfigText) and classifies each by its leading
//! keyword — a closed enum, not a pattern table — collecting the declared
//! species, compartments, and surfaces plus one [`Instruction`] per
//! recognized directive. Everything produced here is descriptive; nothing
//! is ever executed.

use smallvec::SmallVec;

use crate::text::ConfigText;

type Tokens<'a> = SmallVec<[&'a str; 8]>;

/// A recognized directive from one configuration line.
///
/// `macro_text` is the keyword plus its target token, `arguments` the
/// remaining tokens; together they reproduce the command part of the
/// source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Stable identifier, `<keyword>_<target>`.
    pub id: String,
    /// Human-readable description of what the directive controls.
    pub description: String,
    /// Keyword plus target token.
    pub macro_text: String,
    /// Remaining tokens, space-joined.
    pub arguments: String,
}

/// Descriptive entities extracted from one configuration text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigModel {
    /// Declared species names, in declaration order, deduplicated.
    pub species: Vec<String>,
    /// Declared compartment names, in declaration order.
    pub compartments: Vec<String>,
    /// Declared surface names, in declaration order.
    pub surfaces: Vec<String>,
    /// One entry per recognized directive line, in file order.
    pub instructions: Vec<Instruction>,
}

impl ConfigModel {
    /// Extract the model from normalized text.
    ///
    /// Unrecognized lines are skipped; extraction never fails.
    pub fn extract(text: &ConfigText) -> Self {
        let mut model = ConfigModel::default();
        for line in text.lines() {
            let cmd = match line.find('#') {
                Some(pos) => line[..pos].trim_end(),
                None => line.as_str(),
            };
            let mut tokens: Tokens<'_> = cmd.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            // Scheduled commands embed a directive after the timing code:
            // "cmd E killmol red". Classify the embedded keyword.
            if tokens[0] == "cmd" && tokens.len() >= 3 {
                tokens.drain(..2);
            }
            model.classify(&tokens);
        }
        model
    }

    fn classify(&mut self, tokens: &[&str]) {
        let (keyword, rest) = (tokens[0], &tokens[1..]);
        match keyword {
            "species" => {
                for name in rest {
                    push_unique(&mut self.species, name);
                }
            }
            "start_compartment" => {
                if let Some(name) = rest.first() {
                    push_unique(&mut self.compartments, name);
                }
            }
            "start_surface" => {
                if let Some(name) = rest.first() {
                    push_unique(&mut self.surfaces, name);
                }
            }
            _ => {
                if let Some(description) = describe(keyword) {
                    if let Some(target) = rest.first() {
                        self.instructions.push(Instruction {
                            id: format!("{keyword}_{target}"),
                            description: format!("{description} '{target}'"),
                            macro_text: format!("{keyword} {target}"),
                            arguments: rest[1..].join(" "),
                        });
                    }
                }
            }
        }
    }
}

/// Description prefix for a recognized directive keyword, or `None` for
/// keywords that carry no extractable instruction.
fn describe(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "define" => "definition of",
        "difc" | "difc_rule" => "diffusion coefficient of species",
        "difm" | "difm_rule" => "anisotropic diffusion matrix of species",
        "drift" | "drift_rule" => "drift of species",
        "surface_drift" | "surface_drift_rule" => "surface drift of species",
        "killmol" | "killmolprob" | "killmolinsphere" | "killmolincmpt"
        | "killmoloutsidesystem" => "removal of molecules of species",
        "fixmolcount" | "fixmolcountrange" | "fixmolcountonsurf" | "fixmolcountincmpt" => {
            "fixed count of species"
        }
        _ => return None,
    })
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
