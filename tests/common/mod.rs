//! Shared test harness: a scripted stand-in for the external transcoder and
//! recording doubles for the three distribution sinks.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use clipforge::distribute::DistributionRecord;
use clipforge::sinks::{ArchiveStore, Notifier, RecordSink};
use clipforge::variants::{EncoderParams, VariantSpec};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Write an executable shell script that mimics the transcoder's contract:
/// last argument is the output path.
///
/// Behavior is keyed off the output file name:
/// - contains `fail`  -> print a diagnostic to stderr and exit 1
/// - contains `empty` -> create a zero-byte output and exit 0
/// - contains `slow`  -> sleep briefly before writing the output
/// - otherwise        -> write a small output and exit 0
pub fn fake_transcoder(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-transcoder.sh");
    let script = r#"#!/bin/sh
eval "out=\${$#}"
case "$out" in
  *fail*)
    echo "synthetic transcode failure" >&2
    exit 1
    ;;
  *empty*)
    : > "$out"
    exit 0
    ;;
  *slow*)
    sleep 1
    printf 'rendition-bytes' > "$out"
    exit 0
    ;;
  *)
    printf 'rendition-bytes' > "$out"
    exit 0
    ;;
esac
"#;
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Build a catalog spec whose output stem controls the fake transcoder.
pub fn spec(id: u32, stem: &str) -> VariantSpec {
    VariantSpec {
        id,
        label: format!("Variant {id}"),
        filter_graph: "[0:v]setpts=PTS[v];[0:a]anull[a]".to_string(),
        frame_rate: None,
        speed_factor: 1.0,
        encoder: EncoderParams::default(),
        output_name: stem.to_string(),
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    /// Captions of delivered renditions, in delivery order.
    pub videos: Mutex<Vec<String>>,
    /// Plain-text notices, in delivery order.
    pub notices: Mutex<Vec<String>>,
    /// When true, every video push fails.
    pub fail_videos: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_video(&self, _job_id: &str, _artifact: &Path, caption: &str) -> Result<()> {
        if self.fail_videos {
            anyhow::bail!("courier unreachable");
        }
        self.videos.lock().unwrap().push(caption.to_string());
        Ok(())
    }

    async fn send_notice(&self, _job_id: &str, text: &str) -> Result<()> {
        self.notices.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingArchive {
    /// Display names of attempted uploads, in attempt order.
    pub uploads: Mutex<Vec<String>>,
    /// Uploads whose display name contains this marker fail.
    pub fail_marker: Option<String>,
}

#[async_trait]
impl ArchiveStore for RecordingArchive {
    async fn upload(&self, _artifact: &Path, display_name: &str) -> Result<String> {
        self.uploads.lock().unwrap().push(display_name.to_string());
        if let Some(ref marker) = self.fail_marker {
            if display_name.contains(marker.as_str()) {
                anyhow::bail!("archive quota exceeded");
            }
        }
        Ok(format!("https://archive.test/{display_name}"))
    }
}

#[derive(Default)]
pub struct RecordingLedger {
    /// Appended rows, in append order.
    pub rows: Mutex<Vec<DistributionRecord>>,
    /// When true, every append fails.
    pub fail: bool,
}

#[async_trait]
impl RecordSink for RecordingLedger {
    async fn append_row(&self, record: &DistributionRecord) -> Result<()> {
        if self.fail {
            anyhow::bail!("ledger write refused");
        }
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }
}
