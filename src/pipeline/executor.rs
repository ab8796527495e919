//! Drives the external transcoder once per variant.

use crate::variants::VariantSpec;
use clipforge_av::{is_valid_artifact, JobWorkspace, ToolCommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Maximum diagnostic text retained per variant. ffmpeg is chatty on
/// stderr and only the tail names the actual failure.
const DIAGNOSTIC_LIMIT: usize = 4096;

/// Outcome classification for one variant attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantStatus {
    /// The transcoder finished and the output passed validation.
    Succeeded,
    /// The transcoder exited non-zero, or could not be run at all.
    Failed,
    /// The transcoder exited zero but the output is missing or empty.
    Invalid,
}

/// Immutable outcome of attempting one variant spec against one job.
#[derive(Debug, Clone)]
pub struct VariantResult {
    pub variant_id: u32,
    pub label: String,
    pub output_path: PathBuf,
    pub status: VariantStatus,
    /// Captured transcoder diagnostics; present iff the variant did not
    /// succeed.
    pub diagnostic: Option<String>,
}

impl VariantResult {
    /// Whether this rendition is eligible for distribution.
    pub fn succeeded(&self) -> bool {
        self.status == VariantStatus::Succeeded
    }
}

/// Invokes the external transcoder, one invocation per variant.
///
/// Invocations are independent: a failed variant never prevents its
/// siblings, and there are no automatic retries.
pub struct TranscodeExecutor {
    ffmpeg: PathBuf,
    timeout: Duration,
}

impl TranscodeExecutor {
    /// Create an executor around a known transcoder binary.
    pub fn new(ffmpeg: PathBuf, timeout: Duration) -> Self {
        Self { ffmpeg, timeout }
    }

    /// Resolve the transcoder from configuration or PATH.
    pub fn from_config(
        tools: &crate::config::ToolsConfig,
        timeout: Duration,
    ) -> clipforge_av::Result<Self> {
        let ffmpeg = clipforge_av::resolve_tool("ffmpeg", tools.ffmpeg_path.as_deref())?;
        Ok(Self::new(ffmpeg, timeout))
    }

    /// Build the transcoder argument list for one variant.
    pub fn build_args(&self, input: &Path, spec: &VariantSpec, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-filter_complex".to_string(),
            spec.filter_graph.clone(),
            "-map".to_string(),
            "[v]".to_string(),
            "-map".to_string(),
            "[a]".to_string(),
        ];

        if let Some(rate) = spec.frame_rate {
            args.extend(["-r".to_string(), rate.to_string()]);
        }

        args.extend([
            "-c:v".to_string(),
            spec.encoder.codec.clone(),
            "-preset".to_string(),
            spec.encoder.preset.clone(),
            "-crf".to_string(),
            spec.encoder.crf.to_string(),
            output.to_string_lossy().to_string(),
        ]);

        args
    }

    /// Run the transcoder for one variant.
    ///
    /// Never fails the job: spawn errors, non-zero exits and unusable
    /// outputs are all folded into the returned result.
    pub async fn execute(
        &self,
        input: &Path,
        spec: &VariantSpec,
        workspace: &JobWorkspace,
    ) -> VariantResult {
        let output = workspace.variant_output(&spec.output_name);
        let args = self.build_args(input, spec, &output);

        tracing::debug!(variant = spec.id, "transcoder args: {:?}", args);

        let run = ToolCommand::new(&self.ffmpeg)
            .args(args)
            .timeout(self.timeout)
            .run()
            .await;

        match run {
            Ok(out) if out.success() => {
                if is_valid_artifact(&output) {
                    VariantResult {
                        variant_id: spec.id,
                        label: spec.label.clone(),
                        output_path: output,
                        status: VariantStatus::Succeeded,
                        diagnostic: None,
                    }
                } else {
                    VariantResult {
                        variant_id: spec.id,
                        label: spec.label.clone(),
                        output_path: output.clone(),
                        status: VariantStatus::Invalid,
                        diagnostic: Some(format!(
                            "output missing or empty: {}",
                            output.display()
                        )),
                    }
                }
            }
            Ok(out) => {
                let diagnostic = if out.stderr.trim().is_empty() {
                    format!("transcoder exited with status {}", out.status)
                } else {
                    tail(&out.stderr, DIAGNOSTIC_LIMIT)
                };
                VariantResult {
                    variant_id: spec.id,
                    label: spec.label.clone(),
                    output_path: output,
                    status: VariantStatus::Failed,
                    diagnostic: Some(diagnostic),
                }
            }
            Err(e) => VariantResult {
                variant_id: spec.id,
                label: spec.label.clone(),
                output_path: output,
                status: VariantStatus::Failed,
                diagnostic: Some(e.to_string()),
            },
        }
    }
}

/// Keep the last `limit` bytes of a diagnostic stream, respecting UTF-8
/// boundaries.
fn tail(s: &str, limit: usize) -> String {
    let t = s.trim();
    if t.len() <= limit {
        return t.to_string();
    }
    let mut start = t.len() - limit;
    while !t.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &t[start..])
}
