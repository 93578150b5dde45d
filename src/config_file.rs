//! Build configuration: the snapshot a compilation consumes.
//!
//! Field names serialize in camelCase so configurations saved by the order
//! front end load unchanged. User-facing selections stay strings here; the
//! resolver turns them into catalog identifiers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::diagnostics::MissingField;
use crate::error::SinkBomError;
use crate::types::{Placement, WorkflowDirection};

/// Size id marking a custom-dimension basin
pub const CUSTOM_SIZE_ID: &str = "CUSTOM";

fn one() -> u32 {
    1
}

/// Pegboard selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PegboardConfig {
    pub enabled: bool,
    pub type_id: Option<String>,
    pub color_id: Option<String>,
}

/// One basin slot. A freshly-generated slot has every field empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasinConfig {
    /// `E_SINK`, `E_SINK_DI`, `E_DRAIN`, or an already-resolved kit id
    pub type_id: Option<String>,
    /// Fixed catalog size id, legacy alias, or `CUSTOM`
    pub size_id: Option<String>,
    pub custom_width: Option<f64>,
    pub custom_length: Option<f64>,
    pub custom_depth: Option<f64>,
    pub addon_ids: Vec<String>,
}

impl BasinConfig {
    /// Basin of the given type with no size or add-ons
    pub fn of_type(type_id: impl Into<String>) -> Self {
        Self {
            type_id: Some(type_id.into()),
            ..Self::default()
        }
    }

    pub fn is_custom_size(&self) -> bool {
        self.size_id
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(CUSTOM_SIZE_ID))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaucetConfig {
    pub type_id: Option<String>,
    pub placement: Option<Placement>,
    pub quantity: u32,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            type_id: None,
            placement: None,
            quantity: 1,
        }
    }
}

impl FaucetConfig {
    pub fn new(type_id: impl Into<String>, placement: Option<Placement>) -> Self {
        Self {
            type_id: Some(type_id.into()),
            placement,
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SprayerConfig {
    pub type_id: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorySelection {
    pub id: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

impl AccessorySelection {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Configuration of one build unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    // Sink body
    pub sink_model_id: Option<String>,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub legs_type_id: Option<String>,
    pub feet_type_id: Option<String>,
    pub pegboard: PegboardConfig,
    pub drawer_item_ids: Vec<String>,
    pub workflow_direction: WorkflowDirection,

    // Basins and deck fixtures
    pub basins: Vec<BasinConfig>,
    pub faucets: Vec<FaucetConfig>,
    pub sprayers: Vec<SprayerConfig>,

    // Electrical and extras
    pub control_box_id: Option<String>,
    pub accessories: Vec<AccessorySelection>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn is_positive(value: Option<f64>) -> bool {
    value.is_some_and(|v| v.is_finite() && v > 0.0)
}

impl Configuration {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Mandatory facets that are absent or inconsistent.
    ///
    /// An empty result means the configuration is complete. Paths use the
    /// JSON field names with zero-based indices (`basins[0].typeId`).
    pub fn missing_fields(&self, catalog: &Catalog) -> Vec<MissingField> {
        let mut missing = Vec::new();

        if is_blank(&self.sink_model_id) {
            missing.push(MissingField::new("sinkModelId", "no sink model selected"));
        }
        if !is_positive(self.width) {
            missing.push(MissingField::new("width", "sink width must be a positive number"));
        }
        if !is_positive(self.length) {
            missing.push(MissingField::new("length", "sink length must be a positive number"));
        }

        let expected = self
            .sink_model_id
            .as_deref()
            .and_then(|id| catalog.sink_model(id))
            .map(|m| m.basin_count);
        if let Some(expected) = expected {
            if self.basins.len() != expected {
                missing.push(MissingField::new(
                    "basins",
                    format!("expected {} basins, found {}", expected, self.basins.len()),
                ));
            }
        }

        for (i, basin) in self.basins.iter().enumerate() {
            if is_blank(&basin.type_id) {
                missing.push(MissingField::new(
                    format!("basins[{}].typeId", i),
                    "basin type not selected",
                ));
            }
            if is_blank(&basin.size_id) {
                missing.push(MissingField::new(
                    format!("basins[{}].sizeId", i),
                    "basin size not selected",
                ));
            } else if basin.is_custom_size() {
                let dims = [
                    ("customWidth", basin.custom_width),
                    ("customLength", basin.custom_length),
                    ("customDepth", basin.custom_depth),
                ];
                for (name, value) in dims {
                    if !is_positive(value) {
                        missing.push(MissingField::new(
                            format!("basins[{}].{}", i, name),
                            "custom basin dimension must be a positive number",
                        ));
                    }
                }
            }
        }

        if self.pegboard.enabled && is_blank(&self.pegboard.type_id) {
            missing.push(MissingField::new("pegboard.typeId", "pegboard type not selected"));
        }

        missing
    }

    /// True when `missing_fields` is empty
    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        self.missing_fields(catalog).is_empty()
    }

    /// Caller-boundary check: fails with every missing field named.
    pub fn validate(&self, catalog: &Catalog) -> crate::error::Result<()> {
        let missing = self.missing_fields(catalog);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SinkBomError::IncompleteConfiguration {
                fields: missing.into_iter().map(|m| m.field).collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn complete_config() -> Configuration {
        Configuration {
            sink_model_id: Some("T2-B1".to_string()),
            width: Some(30.0),
            length: Some(60.0),
            basins: vec![BasinConfig {
                type_id: Some("E_SINK".to_string()),
                size_id: Some("24X20X8".to_string()),
                ..BasinConfig::default()
            }],
            ..Configuration::default()
        }
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(Configuration::new(), Configuration::default());
    }

    #[test]
    fn test_complete_config_has_no_missing_fields() {
        let catalog = Catalog::builtin();
        let config = complete_config();
        assert!(config.missing_fields(&catalog).is_empty());
        assert!(config.validate(&catalog).is_ok());
    }

    #[test]
    fn test_empty_config_reports_mandatory_facets() {
        let catalog = Catalog::builtin();
        let fields: Vec<String> = Configuration::new()
            .missing_fields(&catalog)
            .into_iter()
            .map(|m| m.field)
            .collect();
        assert_eq!(fields, vec!["sinkModelId", "width", "length"]);
    }

    #[test]
    fn test_basin_count_mismatch_reported() {
        let catalog = Catalog::builtin();
        let mut config = complete_config();
        config.sink_model_id = Some("T2-B2".to_string());
        let missing = config.missing_fields(&catalog);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].field, "basins");
        assert!(missing[0].description.contains("expected 2"));
    }

    #[test]
    fn test_custom_basin_requires_dimensions() {
        let catalog = Catalog::builtin();
        let mut config = complete_config();
        config.basins[0].size_id = Some("custom".to_string());
        config.basins[0].custom_width = Some(24.0);
        let fields: Vec<String> = config
            .missing_fields(&catalog)
            .into_iter()
            .map(|m| m.field)
            .collect();
        assert_eq!(fields, vec!["basins[0].customLength", "basins[0].customDepth"]);
    }

    #[test]
    fn test_validate_names_every_missing_field() {
        let catalog = Catalog::builtin();
        let mut config = complete_config();
        config.width = None;
        config.length = Some(-5.0);
        match config.validate(&catalog) {
            Err(SinkBomError::IncompleteConfiguration { fields }) => {
                assert_eq!(fields, vec!["width", "length"]);
            }
            other => panic!("expected incomplete configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_model_skips_basin_count_check() {
        let catalog = Catalog::empty();
        let mut config = complete_config();
        config.basins.clear();
        assert!(config.is_complete(&catalog));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_string(&complete_config()).unwrap();
        assert!(json.contains("\"sinkModelId\":\"T2-B1\""));
        assert!(json.contains("\"workflowDirection\":\"LEFT_TO_RIGHT\""));
    }

    #[test]
    fn test_sparse_json_fills_defaults() {
        let json = r#"{
            "sinkModelId": "T2-B2",
            "faucets": [{ "typeId": "WRIST_BLADE", "placement": "BETWEEN_BASINS_1_AND_2" }],
            "accessories": [{ "id": "702.10" }]
        }"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.faucets[0].quantity, 1);
        assert_eq!(config.faucets[0].placement, Some(Placement::Between(1)));
        assert_eq!(config.accessories[0].quantity, 1);
        assert!(config.basins.is_empty());
        assert!(!config.pegboard.enabled);
    }

    #[test]
    fn test_invalid_placement_rejected_at_load() {
        let json = r#"{ "faucets": [{ "typeId": "WRIST_BLADE", "placement": "ON_THE_WALL" }] }"#;
        assert!(serde_json::from_str::<Configuration>(json).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let config = complete_config();
        config.save_to_file(file.path()).unwrap();
        let loaded = Configuration::load_from_file(file.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_nonexistent_file() {
        assert!(Configuration::load_from_file("/nonexistent/build.json").is_err());
    }
}
