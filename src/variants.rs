//! The variant catalog: declarative descriptions of every rendition the
//! pipeline produces from one source video.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Encoder settings for a variant rendition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncoderParams {
    /// Video codec (default: libx264).
    #[serde(default = "default_codec")]
    pub codec: String,

    /// Encoding preset (default: "fast").
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Constant rate factor (default: 28).
    #[serde(default = "default_crf")]
    pub crf: u32,
}

fn default_codec() -> String {
    "libx264".to_string()
}

fn default_preset() -> String {
    "fast".to_string()
}

fn default_crf() -> u32 {
    28
}

impl Default for EncoderParams {
    fn default() -> Self {
        Self {
            codec: default_codec(),
            preset: default_preset(),
            crf: default_crf(),
        }
    }
}

/// One configured rendition of the source video.
///
/// Pure data: the pipeline never branches on which variant it is processing,
/// only on the fields below. Adding or removing specs in the configuration
/// does not touch pipeline logic.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VariantSpec {
    /// Ordinal within the catalog (1-based, unique).
    pub id: u32,

    /// Human-readable caption sent with the finished rendition.
    pub label: String,

    /// ffmpeg `-filter_complex` expression producing `[v]` and `[a]` pads.
    pub filter_graph: String,

    /// Target frame rate; the source rate is kept when absent.
    #[serde(default)]
    pub frame_rate: Option<u32>,

    /// Playback speed multiplier. Informational: the actual retiming lives
    /// in the filter graph.
    pub speed_factor: f64,

    #[serde(default)]
    pub encoder: EncoderParams,

    /// Stem for the output file name; the job id is appended so concurrent
    /// jobs never collide.
    pub output_name: String,
}

/// Ordered, immutable catalog of variant specs.
///
/// Catalog order defines both processing and presentation order and is
/// stable across runs.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    specs: Vec<VariantSpec>,
}

impl VariantRegistry {
    /// Build a registry from configured specs, validating catalog
    /// invariants. An empty list falls back to the built-in catalog.
    pub fn from_specs(specs: Vec<VariantSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Ok(Self::default());
        }

        let mut seen = std::collections::HashSet::new();
        for spec in &specs {
            if spec.id == 0 {
                anyhow::bail!("variant ids are 1-based; '{}' has id 0", spec.label);
            }
            if !seen.insert(spec.id) {
                anyhow::bail!("duplicate variant id {}", spec.id);
            }
            if spec.filter_graph.trim().is_empty() {
                anyhow::bail!("variant {} has an empty filter graph", spec.id);
            }
            if spec.output_name.trim().is_empty() {
                anyhow::bail!("variant {} has an empty output name", spec.id);
            }
            if spec.speed_factor <= 0.0 {
                anyhow::bail!(
                    "variant {} has a non-positive speed factor {}",
                    spec.id,
                    spec.speed_factor
                );
            }
            if spec.frame_rate == Some(0) {
                anyhow::bail!("variant {} has a zero frame rate", spec.id);
            }
        }

        Ok(Self { specs })
    }

    /// The specs in catalog order.
    pub fn specs(&self) -> &[VariantSpec] {
        &self.specs
    }

    /// Number of specs in the catalog.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// An intentionally empty catalog. A job run against it completes with
    /// zero variant results.
    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self {
            specs: default_specs(),
        }
    }
}

/// The built-in catalog: five stylistically distinct renditions.
fn default_specs() -> Vec<VariantSpec> {
    vec![
        VariantSpec {
            id: 1,
            label: "Warm LUT + 25fps + 1.1x".to_string(),
            filter_graph: "[0:v]setpts=PTS/1.1,eq=contrast=1.05:brightness=0.02:saturation=1.2[v];[0:a]atempo=1.1[a]".to_string(),
            frame_rate: Some(25),
            speed_factor: 1.1,
            encoder: EncoderParams::default(),
            output_name: "warm_25fps".to_string(),
        },
        VariantSpec {
            id: 2,
            label: "Cold LUT + 30fps + 1.2x".to_string(),
            filter_graph: "[0:v]setpts=PTS/1.2,eq=saturation=0.9:gamma_g=0.95:gamma_b=1.05[v];[0:a]atempo=1.2[a]".to_string(),
            frame_rate: Some(30),
            speed_factor: 1.2,
            encoder: EncoderParams::default(),
            output_name: "cold_30fps".to_string(),
        },
        VariantSpec {
            id: 3,
            label: "Neutral LUT + 50fps + 1.3x".to_string(),
            filter_graph: "[0:v]setpts=PTS/1.3,eq=contrast=1.1:brightness=0.03:saturation=1.0[v];[0:a]atempo=1.3[a]".to_string(),
            frame_rate: Some(50),
            speed_factor: 1.3,
            encoder: EncoderParams::default(),
            output_name: "neutral_50fps".to_string(),
        },
        VariantSpec {
            id: 4,
            label: "Zoom + red bar + 1.05x".to_string(),
            filter_graph: "[0:v]setpts=PTS/1.05,scale=iw*1.05:ih*1.05,crop=iw:ih,drawbox=x=0:y=ih-20:w=iw:h=20:color=red@0.8:t=fill[v];[0:a]atempo=1.05[a]".to_string(),
            frame_rate: None,
            speed_factor: 1.05,
            encoder: EncoderParams::default(),
            output_name: "zoom_bar".to_string(),
        },
        VariantSpec {
            id: 5,
            label: "Rotate + saturation + 1.0x".to_string(),
            filter_graph: "[0:v]setpts=PTS/1.0,eq=saturation=1.1,rotate=2*PI/180:fillcolor=black[v];[0:a]atempo=1.0[a]".to_string(),
            frame_rate: None,
            speed_factor: 1.0,
            encoder: EncoderParams::default(),
            output_name: "rotate_sat".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_five_ordered_specs() {
        let registry = VariantRegistry::default();
        assert_eq!(registry.len(), 5);

        let ids: Vec<u32> = registry.specs().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        // Catalog order is the presentation order and must be stable.
        let stems: Vec<&str> = registry
            .specs()
            .iter()
            .map(|s| s.output_name.as_str())
            .collect();
        assert_eq!(
            stems,
            vec!["warm_25fps", "cold_30fps", "neutral_50fps", "zoom_bar", "rotate_sat"]
        );
    }

    #[test]
    fn default_catalog_frame_rates() {
        let registry = VariantRegistry::default();
        let rates: Vec<Option<u32>> =
            registry.specs().iter().map(|s| s.frame_rate).collect();
        // The zoom and rotate renditions keep the source rate.
        assert_eq!(rates, vec![Some(25), Some(30), Some(50), None, None]);
    }

    #[test]
    fn empty_config_falls_back_to_builtin_catalog() {
        let registry = VariantRegistry::from_specs(Vec::new()).unwrap();
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut specs = default_specs();
        specs[1].id = 1;
        assert!(VariantRegistry::from_specs(specs).is_err());
    }

    #[test]
    fn zero_id_rejected() {
        let mut specs = default_specs();
        specs[0].id = 0;
        assert!(VariantRegistry::from_specs(specs).is_err());
    }

    #[test]
    fn nonpositive_speed_rejected() {
        let mut specs = default_specs();
        specs[2].speed_factor = 0.0;
        assert!(VariantRegistry::from_specs(specs).is_err());
    }

    #[test]
    fn empty_filter_graph_rejected() {
        let mut specs = default_specs();
        specs[4].filter_graph = "  ".to_string();
        assert!(VariantRegistry::from_specs(specs).is_err());
    }

    #[test]
    fn encoder_defaults() {
        let encoder = EncoderParams::default();
        assert_eq!(encoder.codec, "libx264");
        assert_eq!(encoder.preset, "fast");
        assert_eq!(encoder.crf, 28);
    }
}
