//! Job-scoped scratch space for pipeline artifacts.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Exclusive on-disk scratch space for one transcoding job.
///
/// Every artifact of a job lives in one directory whose name embeds the job
/// id, so concurrently running jobs can never collide on file names. The
/// staged input and all variant outputs are removed together by [`cleanup`],
/// and the underlying temp directory is removed on drop should an earlier
/// fault skip the explicit call.
///
/// [`cleanup`]: JobWorkspace::cleanup
///
/// # Example
///
/// ```no_run
/// use clipforge_av::JobWorkspace;
///
/// let mut workspace = JobWorkspace::create("/tmp/clipforge".as_ref(), "7f3a")?;
/// let input = workspace.stage_input("/tmp/upload.mp4".as_ref())?;
/// let output = workspace.variant_output("warm_25fps");
/// // ... run the transcoder input -> output ...
/// workspace.cleanup();
/// # Ok::<(), clipforge_av::Error>(())
/// ```
pub struct JobWorkspace {
    job_id: String,
    root: PathBuf,
    dir: Option<TempDir>,
}

impl JobWorkspace {
    /// Create a fresh workspace under `parent` for the given job.
    pub fn create(parent: &Path, job_id: &str) -> Result<Self> {
        std::fs::create_dir_all(parent)?;

        let dir = tempfile::Builder::new()
            .prefix(&format!("job-{job_id}-"))
            .tempdir_in(parent)
            .map_err(|e| Error::Workspace(format!("failed to create job directory: {e}")))?;

        let root = dir.path().to_path_buf();

        Ok(Self {
            job_id: job_id.to_string(),
            root,
            dir: Some(dir),
        })
    }

    /// Get the job id this workspace belongs to.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Get the workspace directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Take ownership of the received source artifact by moving it into the
    /// workspace.
    ///
    /// Falls back to copy-and-remove when the source lives on a different
    /// filesystem.
    pub fn stage_input(&self, source: &Path) -> Result<PathBuf> {
        if !source.exists() {
            return Err(Error::file_not_found(source));
        }

        let dest = self.input_path();

        if std::fs::rename(source, &dest).is_err() {
            std::fs::copy(source, &dest).map_err(|e| {
                Error::Workspace(format!(
                    "failed to stage input {}: {e}",
                    source.display()
                ))
            })?;
            if let Err(e) = std::fs::remove_file(source) {
                tracing::warn!(
                    "staged input left behind at {}: {e}",
                    source.display()
                );
            }
        }

        Ok(dest)
    }

    /// Path of the staged input artifact.
    pub fn input_path(&self) -> PathBuf {
        self.root.join(format!("input_{}.mp4", self.job_id))
    }

    /// Path for a variant output, derived from the variant's name stem.
    pub fn variant_output(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{stem}_{}.mp4", self.job_id))
    }

    /// Remove every artifact owned by this job.
    ///
    /// Idempotent: calling it again, or after the directory is already gone,
    /// is a no-op. Removal failures are logged and swallowed; scratch-space
    /// trouble must never take a finished job down.
    pub fn cleanup(&mut self) {
        match self.dir.take() {
            Some(dir) => {
                if let Err(e) = dir.close() {
                    tracing::warn!(
                        "failed to remove job workspace {}: {e}",
                        self.root.display()
                    );
                }
            }
            None => {
                if self.root.exists() {
                    if let Err(e) = std::fs::remove_dir_all(&self.root) {
                        tracing::warn!(
                            "failed to remove job workspace {}: {e}",
                            self.root.display()
                        );
                    }
                }
            }
        }
    }
}
