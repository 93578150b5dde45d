//! Shared, versioned lookup tables.
//!
//! Every mapping the engine needs (model basin counts, kit mappings, pegboard
//! coverage, basin sizes and legacy aliases, category ranges) lives in one
//! `Catalog` value that the caller loads once and passes into each compilation.
//!
//! All tables default to empty when absent from a catalog file. An empty or
//! partially-loaded catalog is valid input: unknown identifiers simply pass
//! through the resolver with a warning.

pub mod tables;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::SinkBomError;
use crate::types::Category;

/// Prefix shared by pegboard panels and composed pegboard kits
pub const PEGBOARD_PREFIX: &str = "T2-ADW-PB-";

/// Prefix of standalone pegboard color kits
pub const PEGBOARD_COLOR_KIT_PREFIX: &str = "T2-PB-COLOR-";

fn one() -> u32 {
    1
}

/// A named catalog part with an optional pre-assigned category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPart {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Sink model and the number of basins its body accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkModel {
    pub id: String,
    pub name: String,
    pub basin_count: usize,
}

/// Maps a user-facing selection value onto a purchasable kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitMapping {
    pub value: String,
    pub kit_id: String,
    pub name: String,
}

/// Pegboard coverage bucket: covers sink lengths `min_length..=max_length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegboardBucket {
    pub min_length: f64,
    pub max_length: f64,
    pub size_code: String,
}

impl PegboardBucket {
    pub fn contains(&self, length: f64) -> bool {
        self.min_length <= length && length <= self.max_length
    }
}

/// Short code used when composing identifiers (pegboard type, color).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub value: String,
    pub code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PegboardTable {
    pub buckets: Vec<PegboardBucket>,
    pub types: Vec<CodeEntry>,
    pub colors: Vec<CodeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasinSize {
    pub id: String,
    pub part_number: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitChild {
    pub id: String,
    pub name: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

/// Parent/child relationship: `children` are nested under `id` in the BOM tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitDefinition {
    pub id: String,
    pub children: Vec<KitChild>,
}

/// Control box chosen by basin composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBoxRule {
    pub e_drain: usize,
    pub e_sink: usize,
    pub kit_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRange {
    pub start: u32,
    pub end: u32,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub category: Category,
}

/// The complete lookup set for one catalog version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub version: String,
    pub sink_models: Vec<SinkModel>,
    pub legs: Vec<KitMapping>,
    pub feet: Vec<KitMapping>,
    pub faucet_types: Vec<KitMapping>,
    pub sprayer_types: Vec<KitMapping>,
    pub basin_types: Vec<KitMapping>,
    pub pegboard: PegboardTable,
    pub basin_sizes: Vec<BasinSize>,
    pub basin_size_aliases: BTreeMap<String, String>,
    pub custom_basin_part: String,
    pub basin_addons: Vec<CatalogPart>,
    pub drawers: Vec<CatalogPart>,
    pub control_boxes: Vec<CatalogPart>,
    pub control_box_rules: Vec<ControlBoxRule>,
    pub accessories: Vec<CatalogPart>,
    pub kits: Vec<KitDefinition>,
    pub category_ranges: Vec<CategoryRange>,
    pub keyword_rules: Vec<KeywordRule>,
}

fn mappings(table: &[(&str, &str, &str)]) -> Vec<KitMapping> {
    table
        .iter()
        .map(|(value, kit_id, name)| KitMapping {
            value: value.to_string(),
            kit_id: kit_id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

fn codes(table: &[(&str, &str, &str)]) -> Vec<CodeEntry> {
    table
        .iter()
        .map(|(value, code, name)| CodeEntry {
            value: value.to_string(),
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

fn parts(table: &[(&str, &str)]) -> Vec<CatalogPart> {
    table
        .iter()
        .map(|(id, name)| CatalogPart {
            id: id.to_string(),
            name: name.to_string(),
            category: None,
        })
        .collect()
}

impl Catalog {
    /// Catalog with every table empty (nothing fetched yet).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            version: tables::CATALOG_VERSION.to_string(),
            sink_models: tables::SINK_MODELS
                .iter()
                .map(|(id, name, basin_count)| SinkModel {
                    id: id.to_string(),
                    name: name.to_string(),
                    basin_count: *basin_count,
                })
                .collect(),
            legs: mappings(tables::LEG_TYPES),
            feet: mappings(tables::FEET_TYPES),
            faucet_types: mappings(tables::FAUCET_TYPES),
            sprayer_types: mappings(tables::SPRAYER_TYPES),
            basin_types: mappings(tables::BASIN_TYPES),
            pegboard: PegboardTable {
                buckets: tables::PEGBOARD_BUCKETS
                    .iter()
                    .map(|(min_length, max_length, size_code)| PegboardBucket {
                        min_length: *min_length,
                        max_length: *max_length,
                        size_code: size_code.to_string(),
                    })
                    .collect(),
                types: codes(tables::PEGBOARD_TYPES),
                colors: codes(tables::PEGBOARD_COLORS),
            },
            basin_sizes: tables::BASIN_SIZES
                .iter()
                .map(|(id, part_number, name)| BasinSize {
                    id: id.to_string(),
                    part_number: part_number.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            basin_size_aliases: tables::BASIN_SIZE_ALIASES
                .iter()
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
                .collect(),
            custom_basin_part: tables::CUSTOM_BASIN_PART.to_string(),
            basin_addons: parts(tables::BASIN_ADDONS),
            drawers: parts(tables::DRAWER_ITEMS),
            control_boxes: tables::CONTROL_BOXES
                .iter()
                .map(|(_, _, id, name)| CatalogPart {
                    id: id.to_string(),
                    name: name.to_string(),
                    category: Some(Category::ControlBox),
                })
                .collect(),
            control_box_rules: tables::CONTROL_BOXES
                .iter()
                .map(|(e_drain, e_sink, kit_id, _)| ControlBoxRule {
                    e_drain: *e_drain,
                    e_sink: *e_sink,
                    kit_id: kit_id.to_string(),
                })
                .collect(),
            accessories: parts(tables::ACCESSORIES),
            kits: tables::KITS
                .iter()
                .map(|(id, children)| KitDefinition {
                    id: id.to_string(),
                    children: children
                        .iter()
                        .map(|(child_id, name, quantity)| KitChild {
                            id: child_id.to_string(),
                            name: name.to_string(),
                            quantity: *quantity,
                        })
                        .collect(),
                })
                .collect(),
            category_ranges: tables::CATEGORY_RANGES
                .iter()
                .map(|(start, end, category)| CategoryRange {
                    start: *start,
                    end: *end,
                    category: *category,
                })
                .collect(),
            keyword_rules: tables::KEYWORD_RULES
                .iter()
                .map(|(keywords, category)| KeywordRule {
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                    category: *category,
                })
                .collect(),
        }
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog: Self =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        catalog.validate()?;
        Ok(catalog)
    }

    /// Save the catalog to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write catalog to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Structural consistency checks. Missing tables are fine; malformed ones are not.
    pub fn validate(&self) -> crate::error::Result<()> {
        for model in &self.sink_models {
            if model.basin_count == 0 {
                return Err(SinkBomError::catalog(format!(
                    "sink model '{}' declares zero basins",
                    model.id
                )));
            }
        }

        let mut previous_max: Option<f64> = None;
        for bucket in &self.pegboard.buckets {
            if !(bucket.min_length <= bucket.max_length) {
                return Err(SinkBomError::catalog(format!(
                    "pegboard bucket '{}' has min length above max length",
                    bucket.size_code
                )));
            }
            if let Some(prev) = previous_max {
                if bucket.min_length <= prev {
                    return Err(SinkBomError::catalog(format!(
                        "pegboard bucket '{}' overlaps or is out of ascending order",
                        bucket.size_code
                    )));
                }
            }
            previous_max = Some(bucket.max_length);
        }

        for range in &self.category_ranges {
            if range.start > range.end {
                return Err(SinkBomError::catalog(format!(
                    "category range {}..={} is inverted",
                    range.start, range.end
                )));
            }
        }

        Ok(())
    }

    pub fn sink_model(&self, id: &str) -> Option<&SinkModel> {
        self.sink_models.iter().find(|m| m.id == id)
    }

    /// Children the catalog nests under `kit_id`, if any.
    pub fn kit_children(&self, kit_id: &str) -> &[KitChild] {
        self.kits
            .iter()
            .find(|k| k.id == kit_id)
            .map(|k| k.children.as_slice())
            .unwrap_or(&[])
    }

    /// Identifier of the standalone pegboard color kit for a color code.
    pub fn pegboard_color_kit_id(code: &str) -> String {
        format!("{}{}", PEGBOARD_COLOR_KIT_PREFIX, code)
    }

    /// Identifier of the bare pegboard panel for a coverage bucket.
    pub fn pegboard_panel_id(size_code: &str) -> String {
        format!("{}{}", PEGBOARD_PREFIX, size_code)
    }

    /// Identifier of a composed pegboard kit: `T2-ADW-PB-<size>-<type>[-<color>]-KIT`.
    pub fn pegboard_kit_id(size_code: &str, type_code: &str, color_code: Option<&str>) -> String {
        match color_code {
            Some(color) => format!("{}{}-{}-{}-KIT", PEGBOARD_PREFIX, size_code, type_code, color),
            None => format!("{}{}-{}-KIT", PEGBOARD_PREFIX, size_code, type_code),
        }
    }

    /// Display name for any identifier the catalog knows about.
    pub fn part_name(&self, id: &str) -> Option<&str> {
        let mapped = self
            .legs
            .iter()
            .chain(&self.feet)
            .chain(&self.faucet_types)
            .chain(&self.sprayer_types)
            .chain(&self.basin_types)
            .find(|m| m.kit_id == id)
            .map(|m| m.name.as_str());
        if mapped.is_some() {
            return mapped;
        }

        let listed = self
            .basin_addons
            .iter()
            .chain(&self.drawers)
            .chain(&self.control_boxes)
            .chain(&self.accessories)
            .find(|p| p.id == id)
            .map(|p| p.name.as_str());
        if listed.is_some() {
            return listed;
        }

        if let Some(model) = self.sink_model(id) {
            return Some(model.name.as_str());
        }

        if let Some(size) = self.basin_sizes.iter().find(|s| s.part_number == id) {
            return Some(size.name.as_str());
        }

        self.kits
            .iter()
            .flat_map(|k| &k.children)
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Explicit category a catalog entry carries, if any.
    pub fn part_category(&self, id: &str) -> Option<Category> {
        self.basin_addons
            .iter()
            .chain(&self.drawers)
            .chain(&self.control_boxes)
            .chain(&self.accessories)
            .find(|p| p.id == id)
            .and_then(|p| p.category)
    }

    /// True when `id` is a leg or foot kit (procurement subset).
    pub fn is_leg_or_foot(&self, id: &str) -> bool {
        self.legs.iter().chain(&self.feet).any(|m| m.kit_id == id)
            || self
                .legs
                .iter()
                .chain(&self.feet)
                .any(|m| self.kit_children(&m.kit_id).iter().any(|c| c.id == id))
    }
}
