//! Transient output files and the per-task temporary workspace.
//!
//! Every task execution owns a [`TaskWorkspace`]: a fresh temporary
//! directory holding the rewritten configuration file and every engine
//! output file. The workspace removes the whole directory in `Drop`, so
//! resource release is guaranteed on all exit paths — success, decode
//! failure, or engine-construction failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter distinguishing workspaces within one process.
static WORKSPACE_SEQ: AtomicU64 = AtomicU64::new(0);

/// One engine output file, owned exclusively by one task execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    /// Name the engine knows the file by.
    pub logical_name: String,
    /// Where the file lives on disk.
    pub physical_path: PathBuf,
}

/// Scope-owned temporary directory for one task execution.
///
/// Holds the rewritten configuration file plus all output files. The
/// directory and everything in it are deleted when the workspace drops.
#[derive(Debug)]
pub struct TaskWorkspace {
    dir: PathBuf,
}

impl TaskWorkspace {
    /// Create a fresh, empty workspace directory.
    pub fn create() -> io::Result<Self> {
        let seq = WORKSPACE_SEQ.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("brume-{}-{seq}", process::id()));
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The workspace directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for the rewritten configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.dir.join("model.txt")
    }

    /// Allocate the `index`-th output file.
    ///
    /// The engine writes output files next to the configuration file, so
    /// the physical path is the logical name resolved in the workspace
    /// directory.
    pub fn output_file(&self, index: usize) -> OutputFile {
        let logical_name = format!("out_{index}.txt");
        OutputFile {
            physical_path: self.dir.join(&logical_name),
            logical_name,
        }
    }
}

impl Drop for TaskWorkspace {
    fn drop(&mut self) {
        // Unconditional cleanup; a failed removal must not mask the
        // error already propagating.
        let _ = fs::remove_dir_all(&self.dir);
    }
}
