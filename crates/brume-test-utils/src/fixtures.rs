//! On-disk model fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

static FIXTURE_SEQ: AtomicU64 = AtomicU64::new(0);

/// A small two-species model in the engine's configuration language.
pub const TWO_SPECIES_MODEL: &str = "\
# minimal reaction-diffusion model
dim 3
species red green
difc red 3
difc green 1
graphics opengl
boundaries x 0 100
boundaries y 0 100
boundaries z 0 100
time_start 0
time_stop 100
time_step 0.01
mol 50 red u u u
mol 50 green u u u
end_file
ignored trailing text
";

/// A model file written to a temporary path, removed on drop.
///
/// Keeps the fixture alive for the duration of a test:
///
/// ```ignore
/// let model = TempModel::two_species();
/// let task = task_for(model.path());
/// ```
#[derive(Debug)]
pub struct TempModel {
    path: PathBuf,
}

impl TempModel {
    /// Write `contents` to a fresh temporary file.
    pub fn new(contents: &str) -> Self {
        let seq = FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed);
        let path =
            std::env::temp_dir().join(format!("brume-fixture-{}-{seq}.txt", process::id()));
        fs::write(&path, contents).expect("write fixture model");
        Self { path }
    }

    /// The standard two-species model.
    pub fn two_species() -> Self {
        Self::new(TWO_SPECIES_MODEL)
    }

    /// Path of the on-disk model file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempModel {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
