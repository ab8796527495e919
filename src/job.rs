//! Job identity and lifecycle phases.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// One transcoding request: a single source artifact fanned into N
/// renditions.
///
/// The job exclusively owns its input and output files for the duration of
/// the run; every artifact name is derived from `id`, so concurrent jobs
/// never touch each other's files.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub input_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a job with a fresh identifier.
    pub fn new(input_path: PathBuf) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), input_path)
    }

    /// Create a job with an identifier supplied by the inbound transport.
    pub fn with_id(id: impl Into<String>, input_path: PathBuf) -> Self {
        Self {
            id: id.into(),
            input_path,
            created_at: Utc::now(),
        }
    }
}

/// Coordinator phase, logged as the job advances.
///
/// There is no whole-job failed phase: individual variant failures are
/// recorded in their results and the job still reaches `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Received,
    Acquiring,
    Transcoding,
    Distributing,
    Completed,
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobPhase::Received => "received",
            JobPhase::Acquiring => "acquiring",
            JobPhase::Transcoding => "transcoding",
            JobPhase::Distributing => "distributing",
            JobPhase::Completed => "completed",
        };
        f.write_str(name)
    }
}
