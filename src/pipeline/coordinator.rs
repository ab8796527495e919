//! Single-job lifecycle orchestration.

use crate::config::{DistributionConfig, PipelineConfig};
use crate::distribute::{self, DistributionOutcome};
use crate::error::JobError;
use crate::job::{Job, JobPhase};
use crate::pipeline::executor::{TranscodeExecutor, VariantResult, VariantStatus};
use crate::sinks::{ArchiveStore, Notifier, RecordSink};
use crate::variants::VariantRegistry;
use chrono::{DateTime, Utc};
use clipforge_av::JobWorkspace;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Final account of one job run.
#[derive(Debug)]
pub struct JobReport {
    pub job_id: String,
    /// Variant results in catalog order.
    pub results: Vec<VariantResult>,
    /// Fan-out outcomes for the succeeded variants, in catalog order.
    pub distributions: Vec<DistributionOutcome>,
    pub completed_at: DateTime<Utc>,
}

impl JobReport {
    /// Number of renditions that were produced and validated.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }

    /// Number of renditions that failed or produced unusable output.
    pub fn not_produced(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Owns a single job's lifecycle: drives the executor over the variant
/// catalog, validates and distributes each rendition, and cleans the
/// workspace exactly once at job end.
///
/// The catalog order is the presentation order: renditions reach the caller
/// in catalog order even when transcodes run concurrently, because results
/// are consumed through an ordered buffered stream.
pub struct PipelineCoordinator {
    registry: VariantRegistry,
    executor: TranscodeExecutor,
    pipeline: PipelineConfig,
    distribution: DistributionConfig,
    notifier: Arc<dyn Notifier>,
    archive: Arc<dyn ArchiveStore>,
    ledger: Arc<dyn RecordSink>,
}

impl PipelineCoordinator {
    pub fn new(
        registry: VariantRegistry,
        executor: TranscodeExecutor,
        pipeline: PipelineConfig,
        distribution: DistributionConfig,
        notifier: Arc<dyn Notifier>,
        archive: Arc<dyn ArchiveStore>,
        ledger: Arc<dyn RecordSink>,
    ) -> Self {
        Self {
            registry,
            executor,
            pipeline,
            distribution,
            notifier,
            archive,
            ledger,
        }
    }

    /// Run one job start to finish.
    ///
    /// Only input acquisition can fail the job; every later fault is folded
    /// into the report. The workspace (staged input plus all outputs) is
    /// removed on every exit path: explicitly at the end of a run, or by the
    /// workspace drop when acquisition bails out early.
    pub async fn run_job(&self, job: Job) -> Result<JobReport, JobError> {
        tracing::info!(
            job = %job.id,
            phase = %JobPhase::Received,
            input = %job.input_path.display(),
            "job received"
        );

        tracing::info!(job = %job.id, phase = %JobPhase::Acquiring, "staging input artifact");
        let mut workspace = JobWorkspace::create(&self.pipeline.work_dir, &job.id)
            .map_err(|e| JobError::Acquisition {
                path: job.input_path.clone(),
                source: e,
            })?;
        let input = workspace
            .stage_input(&job.input_path)
            .map_err(|e| JobError::Acquisition {
                path: job.input_path.clone(),
                source: e,
            })?;

        let specs = self.registry.specs();
        let concurrency = self.pipeline.concurrency.max(1);

        let mut results = Vec::with_capacity(specs.len());
        let mut distributions = Vec::new();

        {
            let workspace_ref = &workspace;
            let input_ref = &input;
            let job_id = job.id.clone();

            // Transcodes run up to `concurrency` at a time; the buffered
            // stream yields results in catalog order, so each rendition is
            // distributed in order while later transcodes keep running.
            let mut pending = stream::iter(specs.iter().map(|spec| {
                let job_id = job_id.clone();
                async move {
                    tracing::info!(
                        job = %job_id,
                        phase = %JobPhase::Transcoding,
                        variant = spec.id,
                        label = %spec.label,
                        "transcoding variant"
                    );
                    self.executor.execute(input_ref, spec, workspace_ref).await
                }
            }))
            .buffered(concurrency);

            while let Some(result) = pending.next().await {
                if result.succeeded() {
                    tracing::info!(
                        job = %job.id,
                        phase = %JobPhase::Distributing,
                        variant = result.variant_id,
                        "distributing rendition"
                    );
                    let outcome = distribute::fan_out(
                        self.notifier.as_ref(),
                        self.archive.as_ref(),
                        self.ledger.as_ref(),
                        &self.distribution,
                        &job,
                        &result,
                    )
                    .await;
                    distributions.push(outcome);
                } else {
                    tracing::warn!(
                        job = %job.id,
                        variant = result.variant_id,
                        status = ?result.status,
                        diagnostic = result.diagnostic.as_deref().unwrap_or(""),
                        "variant not produced"
                    );
                    self.notify_failure(&job, &result).await;
                }
                results.push(result);
            }
        }

        workspace.cleanup();

        tracing::info!(
            job = %job.id,
            phase = %JobPhase::Completed,
            produced = results.iter().filter(|r| r.succeeded()).count(),
            total = results.len(),
            "job completed"
        );

        Ok(JobReport {
            job_id: job.id,
            results,
            distributions,
            completed_at: Utc::now(),
        })
    }

    /// Tell the caller a rendition was not created. Best-effort: a lost
    /// notice is logged, nothing else.
    async fn notify_failure(&self, job: &Job, result: &VariantResult) {
        let reason = match result.status {
            VariantStatus::Failed => "transcoder failed",
            VariantStatus::Invalid => "output was empty or missing",
            VariantStatus::Succeeded => return,
        };
        let text = format!("{} not created: {}", result.label, reason);

        if let Err(e) = self.notifier.send_notice(&job.id, &text).await {
            tracing::warn!(
                job = %job.id,
                variant = result.variant_id,
                "failure notice not delivered: {e:#}"
            );
        }
    }
}
