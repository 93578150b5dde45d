//! Selection Resolver
//!
//! Translates user-facing selections (basin types, size ids, pegboard options,
//! faucet/sprayer/leg types) into concrete catalog identifiers.
//!
//! # Design
//!
//! - **Pure logic**: No I/O, no shared state. Identical input, identical output.
//! - **Idempotent**: Resolving an already-resolved identifier returns it unchanged,
//!   so a resolved configuration can be fed back through without drift.
//! - **Never fails**: Unknown values pass through with a warning attached.
//!
//! # Resolution Rules
//!
//! | Selection          | Resolved To |
//! |--------------------|-------------|
//! | basin `typeId`     | Fixed basin kit (`T2-BSN-*-KIT`) |
//! | basin `sizeId`     | Canonical basin part number (direct table, then legacy alias) |
//! | `CUSTOM` size      | `WxLxD` descriptor part, generic placeholder nested under it |
//! | pegboard           | Coverage bucket + type code + color code |
//! | legs / feet        | Leg or feet kit |
//! | faucet / sprayer   | Faucet or sprayer kit |
//! | empty control box  | Control box chosen by basin composition |

use tracing::debug;

use crate::catalog::{tables, Catalog, KitMapping, PegboardBucket, PegboardTable};
use crate::config_file::{BasinConfig, Configuration};
use crate::diagnostics::Diagnostic;
use crate::types::BasinKind;

/// User-facing faucet value that always denotes the DI gooseneck
pub const DI_GOOSENECK_VALUE: &str = "DI_GOOSENECK";

/// Kit identifier of the DI gooseneck faucet
pub const DI_GOOSENECK_FAUCET: &str = "T2-OA-DI-GOOSENECK-FAUCET-KIT";

/// Display name of the generic custom basin placeholder
pub const CUSTOM_BASIN_NAME: &str = "Custom Basin";

// ============================================================================
// Resolution Result
// ============================================================================

/// Outcome of mapping a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub id: String,
    /// Present when the value was not recognised and passed through as-is.
    pub warning: Option<String>,
}

impl Resolved {
    fn known(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            warning: None,
        }
    }

    fn passthrough(id: impl Into<String>, warning: String) -> Self {
        Self {
            id: id.into(),
            warning: Some(warning),
        }
    }

    pub fn is_known(&self) -> bool {
        self.warning.is_none()
    }
}

// ============================================================================
// Basin Type
// ============================================================================

/// Map a basin type selection onto its basin kit.
///
/// `E_SINK`, `E_SINK_DI` and `E_DRAIN` map to fixed kits; kit identifiers pass
/// through unchanged. Anything else passes through with a warning.
pub fn resolve_basin_type(value: &str) -> Resolved {
    let trimmed = value.trim();

    if let Ok(kind) = trimmed.parse::<BasinKind>() {
        return Resolved::known(kind.kit_id());
    }
    if BasinKind::from_kit_id(trimmed).is_some() {
        return Resolved::known(trimmed);
    }

    Resolved::passthrough(value, format!("unknown basin type '{}'", value))
}

/// Basin kind of a slot, whichever form its type id is in.
pub fn basin_kind(basin: &BasinConfig) -> Option<BasinKind> {
    let type_id = basin.type_id.as_deref()?;
    BasinKind::from_kit_id(&resolve_basin_type(type_id).id)
}

// ============================================================================
// Basin Size
// ============================================================================

/// Resolved basin size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBasinSize {
    /// Canonical part number, or the dimension descriptor of a custom basin
    pub part_number: String,
    pub name: String,
    /// Generic custom placeholder part, nested under a dimensioned custom basin
    pub placeholder: Option<String>,
    pub warning: Option<String>,
}

/// Print a dimension the same way every time: `24` for 24.0, `24.5` for 24.5.
fn format_dimension(value: f64) -> String {
    format!("{}", value)
}

/// Descriptive identifier for a custom basin, e.g. `T2-ADW-BASIN24X20X8`.
///
/// Deterministic: identical dimensions always give the identical string.
pub fn custom_basin_descriptor(width: f64, length: f64, depth: f64) -> String {
    format!(
        "T2-ADW-BASIN{}X{}X{}",
        format_dimension(width),
        format_dimension(length),
        format_dimension(depth)
    )
}

/// Catalog part standing in for every custom basin.
pub fn custom_basin_placeholder(catalog: &Catalog) -> &str {
    if catalog.custom_basin_part.is_empty() {
        tables::CUSTOM_BASIN_PART
    } else {
        &catalog.custom_basin_part
    }
}

/// Resolve the size of one basin. Returns `None` when no size is selected.
///
/// A dimensioned custom basin is identified by its descriptor, so two
/// different custom sizes never share an id. When the descriptor happens to
/// be a catalog part, the catalog name is used so both spellings merge.
pub fn resolve_basin_size(basin: &BasinConfig, catalog: &Catalog) -> Option<ResolvedBasinSize> {
    let size_id = basin.size_id.as_deref()?.trim();
    if size_id.is_empty() {
        return None;
    }

    if basin.is_custom_size() {
        let placeholder = custom_basin_placeholder(catalog).to_string();

        return Some(match (basin.custom_width, basin.custom_length, basin.custom_depth) {
            (Some(w), Some(l), Some(d)) => {
                let descriptor = custom_basin_descriptor(w, l, d);
                let name = match catalog.part_name(&descriptor) {
                    Some(name) => name.to_string(),
                    None => format!(
                        "{} {}x{}x{}",
                        CUSTOM_BASIN_NAME,
                        format_dimension(w),
                        format_dimension(l),
                        format_dimension(d)
                    ),
                };
                ResolvedBasinSize {
                    part_number: descriptor,
                    name,
                    placeholder: Some(placeholder),
                    warning: None,
                }
            }
            _ => ResolvedBasinSize {
                part_number: placeholder,
                name: CUSTOM_BASIN_NAME.to_string(),
                placeholder: None,
                warning: Some("custom basin is missing one or more dimensions".to_string()),
            },
        });
    }

    // 1. Direct size-id table
    if let Some(size) = catalog
        .basin_sizes
        .iter()
        .find(|s| s.id.eq_ignore_ascii_case(size_id))
    {
        return Some(ResolvedBasinSize {
            part_number: size.part_number.clone(),
            name: size.name.clone(),
            placeholder: None,
            warning: None,
        });
    }

    // 2. Already canonical, or a legacy alias of a canonical part
    let canonical = if catalog.basin_sizes.iter().any(|s| s.part_number == size_id) {
        Some(size_id)
    } else {
        catalog.basin_size_aliases.get(size_id).map(String::as_str)
    };
    if let Some(part_number) = canonical {
        let name = catalog.part_name(part_number).unwrap_or(part_number).to_string();
        return Some(ResolvedBasinSize {
            part_number: part_number.to_string(),
            name,
            placeholder: None,
            warning: None,
        });
    }

    Some(ResolvedBasinSize {
        part_number: size_id.to_string(),
        name: size_id.to_string(),
        placeholder: None,
        warning: Some(format!("unknown basin size '{}'", size_id)),
    })
}

// ============================================================================
// Pegboard
// ============================================================================

/// Pegboard kit composed from coverage bucket, type and color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PegboardKit {
    pub kit_id: String,
    pub size_code: String,
    pub type_code: String,
    pub color_code: Option<String>,
    /// Panel sized for the bucket, nested under the kit
    pub size_kit_id: String,
    /// Standalone color kit, nested under the kit
    pub color_kit_id: Option<String>,
    pub warnings: Vec<String>,
}

/// Smallest bucket whose inclusive upper bound covers `length`.
///
/// Lengths beyond every bucket (and NaN) clamp to the largest bucket.
fn select_bucket(buckets: &[PegboardBucket], length: f64) -> Option<&PegboardBucket> {
    buckets
        .iter()
        .find(|b| length <= b.max_length)
        .or_else(|| buckets.last())
}

/// Resolve a pegboard kit for the given sink length, type and color.
///
/// Pure and total over every numeric length. Returns `None` only when the
/// catalog has no coverage buckets loaded.
pub fn resolve_pegboard_kit(
    sink_length: f64,
    pegboard_type: &str,
    color: Option<&str>,
    table: &PegboardTable,
) -> Option<PegboardKit> {
    let bucket = select_bucket(&table.buckets, sink_length)?;
    let mut warnings = Vec::new();

    let type_value = pegboard_type.trim();
    let type_code = match table
        .types
        .iter()
        .find(|t| t.value.eq_ignore_ascii_case(type_value) || t.code == type_value)
    {
        Some(entry) => entry.code.clone(),
        None => {
            warnings.push(format!("unknown pegboard type '{}'", pegboard_type));
            type_value.to_string()
        }
    };

    let color_code = color
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| {
            match table
                .colors
                .iter()
                .find(|e| e.value.eq_ignore_ascii_case(c) || e.code == c)
            {
                Some(entry) => entry.code.clone(),
                None => {
                    warnings.push(format!("unknown pegboard color '{}'", c));
                    c.to_string()
                }
            }
        });

    Some(PegboardKit {
        kit_id: Catalog::pegboard_kit_id(&bucket.size_code, &type_code, color_code.as_deref()),
        size_kit_id: Catalog::pegboard_panel_id(&bucket.size_code),
        color_kit_id: color_code.as_deref().map(Catalog::pegboard_color_kit_id),
        size_code: bucket.size_code.clone(),
        type_code,
        color_code,
        warnings,
    })
}

// ============================================================================
// Kit Mappings (legs, feet, faucets, sprayers)
// ============================================================================

fn resolve_mapping(table: &[KitMapping], value: &str, what: &str) -> Resolved {
    let trimmed = value.trim();
    match table
        .iter()
        .find(|m| m.value.eq_ignore_ascii_case(trimmed) || m.kit_id == trimmed)
    {
        Some(mapping) => Resolved::known(mapping.kit_id.clone()),
        None => Resolved::passthrough(value, format!("unknown {} '{}'", what, value)),
    }
}

pub fn resolve_leg_kit(value: &str, catalog: &Catalog) -> Resolved {
    resolve_mapping(&catalog.legs, value, "legs type")
}

pub fn resolve_feet_kit(value: &str, catalog: &Catalog) -> Resolved {
    resolve_mapping(&catalog.feet, value, "feet type")
}

pub fn resolve_faucet_kit(value: &str, catalog: &Catalog) -> Resolved {
    // The DI gooseneck must resolve even before the faucet table is loaded
    if is_di_gooseneck(value) {
        return Resolved::known(DI_GOOSENECK_FAUCET);
    }
    resolve_mapping(&catalog.faucet_types, value, "faucet type")
}

pub fn resolve_sprayer_kit(value: &str, catalog: &Catalog) -> Resolved {
    resolve_mapping(&catalog.sprayer_types, value, "sprayer type")
}

/// True for either form of the DI gooseneck faucet
pub fn is_di_gooseneck(type_id: &str) -> bool {
    let trimmed = type_id.trim();
    trimmed.eq_ignore_ascii_case(DI_GOOSENECK_VALUE) || trimmed == DI_GOOSENECK_FAUCET
}

// ============================================================================
// Control Box
// ============================================================================

/// Pick the control box for a basin composition.
///
/// Counts E-drain and E-sink basins (DI counts as E-sink) and looks the pair
/// up in the catalog. Returns `None` when nothing matches.
pub fn select_control_box(basins: &[BasinConfig], catalog: &Catalog) -> Option<String> {
    let kinds: Vec<BasinKind> = basins.iter().filter_map(basin_kind).collect();
    let e_drain = kinds.iter().filter(|k| **k == BasinKind::EDrain).count();
    let e_sink = kinds.iter().filter(|k| k.is_e_sink()).count();

    if e_drain + e_sink == 0 {
        return None;
    }

    catalog
        .control_box_rules
        .iter()
        .find(|r| r.e_drain == e_drain && r.e_sink == e_sink)
        .map(|r| r.kit_id.clone())
}

// ============================================================================
// Whole Configuration
// ============================================================================

fn resolve_field(
    field: &mut Option<String>,
    facet: &str,
    diagnostics: &mut Vec<Diagnostic>,
    resolve: impl Fn(&str) -> Resolved,
) {
    let resolved = match field.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(value) => resolve(value),
        None => return,
    };
    if let Some(warning) = resolved.warning {
        diagnostics.push(Diagnostic::resolution(facet, warning));
    }
    *field = Some(resolved.id);
}

/// Resolve every user-facing selection in a configuration snapshot.
///
/// Returns the resolved snapshot plus any resolution warnings. Basin sizes are
/// rewritten to canonical part numbers; `CUSTOM` sizes keep their dimensions.
pub fn resolve_configuration(
    config: &Configuration,
    catalog: &Catalog,
) -> (Configuration, Vec<Diagnostic>) {
    let mut resolved = config.clone();
    let mut diagnostics = Vec::new();

    resolve_field(&mut resolved.legs_type_id, "legs", &mut diagnostics, |v| {
        resolve_leg_kit(v, catalog)
    });
    resolve_field(&mut resolved.feet_type_id, "feet", &mut diagnostics, |v| {
        resolve_feet_kit(v, catalog)
    });

    for (i, basin) in resolved.basins.iter_mut().enumerate() {
        let facet = format!("basin[{}]", i + 1);
        resolve_field(&mut basin.type_id, &facet, &mut diagnostics, resolve_basin_type);

        if basin.is_custom_size() {
            continue;
        }
        if let Some(size) = resolve_basin_size(basin, catalog) {
            if let Some(warning) = size.warning {
                diagnostics.push(Diagnostic::resolution(format!("{}.size", facet), warning));
            }
            basin.size_id = Some(size.part_number);
        }
    }

    for (i, faucet) in resolved.faucets.iter_mut().enumerate() {
        let facet = format!("faucet[{}]", i + 1);
        resolve_field(&mut faucet.type_id, &facet, &mut diagnostics, |v| {
            resolve_faucet_kit(v, catalog)
        });
    }

    for (i, sprayer) in resolved.sprayers.iter_mut().enumerate() {
        let facet = format!("sprayer[{}]", i + 1);
        resolve_field(&mut sprayer.type_id, &facet, &mut diagnostics, |v| {
            resolve_sprayer_kit(v, catalog)
        });
    }

    let explicit_box = resolved
        .control_box_id
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string);
    match explicit_box {
        Some(id) => {
            if !catalog.control_boxes.iter().any(|p| p.id == id) {
                diagnostics.push(Diagnostic::resolution(
                    "controlBox",
                    format!("unknown control box '{}'", id),
                ));
            }
        }
        None => {
            resolved.control_box_id = select_control_box(&resolved.basins, catalog);
            if resolved.control_box_id.is_none() && !resolved.basins.is_empty() {
                diagnostics.push(Diagnostic::resolution(
                    "controlBox",
                    "no control box matches the basin composition",
                ));
            }
        }
    }

    debug!(
        "Resolved configuration: {} basins, {} faucets, {} warnings",
        resolved.basins.len(),
        resolved.faucets.len(),
        diagnostics.len()
    );
    (resolved, diagnostics)
}

// ============================================================================
// Tests
// ============================================================================
