use crate::variants::VariantSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub distribution: DistributionConfig,

    #[serde(default)]
    pub courier: CourierConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Variant catalog override; the built-in catalog is used when empty.
    #[serde(default)]
    pub variants: Vec<VariantSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Directory job workspaces are created under.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// How many variants of one job may transcode at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-invocation transcoder timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_work_dir() -> PathBuf {
    std::env::temp_dir().join("clipforge")
}

fn default_concurrency() -> usize {
    2
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DistributionConfig {
    /// Target channels; each succeeded rendition yields one ledger row per
    /// channel.
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,

    /// Title carried by every ledger row.
    #[serde(default = "default_title")]
    pub title: String,

    /// Free-form note carried by every ledger row.
    #[serde(default)]
    pub note: String,

    /// Tags carried by every ledger row.
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,

    /// Publishing profile name carried by every ledger row.
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_channels() -> Vec<String> {
    vec!["primary".to_string()]
}

fn default_title() -> String {
    "Auto rendition".to_string()
}

fn default_tags() -> Vec<String> {
    vec!["auto".to_string(), "clipforge".to_string()]
}

fn default_profile() -> String {
    "default".to_string()
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            title: default_title(),
            note: String::new(),
            tags: default_tags(),
            profile: default_profile(),
        }
    }
}

/// Messaging transport that carries renditions and notices back to the
/// caller.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CourierConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub token: String,
}

/// Durable artifact store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub token: String,

    /// Collection uploads are filed under.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "clipforge".to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            collection: default_collection(),
        }
    }
}

/// Append-only tabular ledger.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub token: String,

    /// Logical table rows are appended to.
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "distribution".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            table: default_table(),
        }
    }
}
