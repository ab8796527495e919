//! Job-level errors.
//!
//! Only input acquisition can abort a job. Every other fault — a variant
//! exiting non-zero, a sink rejecting an upload, scratch-space removal
//! trouble — is isolated at its own step and recorded instead of propagated.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The source artifact could not be staged; no variants were attempted.
    #[error("failed to acquire input artifact {}: {source}", path.display())]
    Acquisition {
        path: PathBuf,
        #[source]
        source: clipforge_av::Error,
    },
}
