//! Fan-out of one finished rendition to the notification channel, the
//! archive store and the distribution ledger.

use crate::config::DistributionConfig;
use crate::job::Job;
use crate::pipeline::{VariantResult, VariantStatus};
use crate::sinks::{ArchiveStore, Notifier, RecordSink};
use chrono::Utc;
use serde::Serialize;

/// One row destined for the distribution ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRecord {
    pub job_id: String,
    pub variant_label: String,
    pub date: String,
    pub archive_link: String,
    pub title: String,
    pub note: String,
    pub tags: Vec<String>,
    pub profile: String,
    pub target_channel: String,
    pub status: String,
}

/// What actually reached the sinks for one rendition.
#[derive(Debug, Clone)]
pub struct DistributionOutcome {
    pub variant_id: u32,
    pub notified: bool,
    pub archive_link: Option<String>,
    pub rows_appended: usize,
}

/// Push one rendition to every distribution sink.
///
/// No-op for results that did not succeed. The notification push is
/// best-effort: its failure is logged and the archive upload still
/// proceeds. A failed upload is terminal for this rendition's ledger rows,
/// since a row without a durable link is invalid data. Row appends are
/// isolated per channel.
pub async fn fan_out(
    notifier: &dyn Notifier,
    archive: &dyn ArchiveStore,
    ledger: &dyn RecordSink,
    cfg: &DistributionConfig,
    job: &Job,
    result: &VariantResult,
) -> DistributionOutcome {
    let mut outcome = DistributionOutcome {
        variant_id: result.variant_id,
        notified: false,
        archive_link: None,
        rows_appended: 0,
    };

    if result.status != VariantStatus::Succeeded {
        return outcome;
    }

    match notifier
        .send_video(&job.id, &result.output_path, &result.label)
        .await
    {
        Ok(()) => {
            tracing::info!(job = %job.id, variant = result.variant_id, "rendition delivered to caller");
            outcome.notified = true;
        }
        Err(e) => {
            tracing::warn!(
                job = %job.id,
                variant = result.variant_id,
                "notification push failed: {e:#}"
            );
        }
    }

    let display_name = result
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| format!("{}_{}.mp4", result.variant_id, job.id));

    let link = match archive.upload(&result.output_path, &display_name).await {
        Ok(link) => link,
        Err(e) => {
            tracing::warn!(
                job = %job.id,
                variant = result.variant_id,
                "archive upload failed, skipping ledger rows: {e:#}"
            );
            return outcome;
        }
    };
    outcome.archive_link = Some(link.clone());

    let date = Utc::now().format("%Y-%m-%d").to_string();
    for channel in &cfg.channels {
        let record = DistributionRecord {
            job_id: job.id.clone(),
            variant_label: result.label.clone(),
            date: date.clone(),
            archive_link: link.clone(),
            title: cfg.title.clone(),
            note: cfg.note.clone(),
            tags: cfg.tags.clone(),
            profile: cfg.profile.clone(),
            target_channel: channel.clone(),
            status: "done".to_string(),
        };

        match ledger.append_row(&record).await {
            Ok(()) => outcome.rows_appended += 1,
            Err(e) => {
                tracing::warn!(
                    job = %job.id,
                    variant = result.variant_id,
                    channel = %channel,
                    "ledger append failed: {e:#}"
                );
            }
        }
    }

    outcome
}
