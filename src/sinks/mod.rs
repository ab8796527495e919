//! Capability interfaces for the external distribution collaborators.
//!
//! The coordinator only ever sees these traits; the concrete HTTP clients
//! live in the sibling modules, and tests inject doubles implementing the
//! same contracts.

pub mod archive;
pub mod courier;
pub mod ledger;

pub use archive::HttpArchive;
pub use courier::HttpCourier;
pub use ledger::HttpLedger;

use crate::distribute::DistributionRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Caller-facing message channel. Best-effort from the pipeline's view:
/// a lost message is reported but never aborts distribution.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a finished rendition with its caption.
    async fn send_video(&self, job_id: &str, artifact: &Path, caption: &str) -> Result<()>;

    /// Deliver a plain-text notice, e.g. for a rendition that was not
    /// created.
    async fn send_notice(&self, job_id: &str, text: &str) -> Result<()>;
}

/// Durable artifact storage returning a shareable link per upload.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    async fn upload(&self, artifact: &Path, display_name: &str) -> Result<String>;
}

/// Append-only tabular ledger; one logical row per call, each row
/// individually atomic.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn append_row(&self, record: &DistributionRecord) -> Result<()>;
}
