//! Configuration Rule Engine
//!
//! Enforces the structural rules of a sink build and repairs derived state
//! that an edit has invalidated.
//!
//! # Rules
//!
//! | Rule               | Enforcement |
//! |--------------------|-------------|
//! | Basin capacity     | Selecting a model regenerates exactly N empty basin slots |
//! | Faucet ceiling     | Excess faucets are dropped from the end (never the DI gooseneck) |
//! | Placement legality | Invalid or duplicate placements move to the first free candidate |
//! | DI gooseneck       | An `E_SINK_DI` basin injects one DI gooseneck faucet if none exists |
//!
//! Every repair is a fallback, not an error: it is recorded as a
//! `RuleRepair` diagnostic and the configuration stays usable.
//!
//! # Idempotence
//!
//! `apply_rules` on an already-compliant configuration changes nothing and
//! reports nothing.

use tracing::debug;

use crate::catalog::Catalog;
use crate::config_file::{BasinConfig, Configuration, FaucetConfig};
use crate::diagnostics::Diagnostic;
use crate::logic::resolver::{basin_kind, is_di_gooseneck, DI_GOOSENECK_FAUCET};
use crate::types::{BasinKind, Placement};

// ============================================================================
// Faucet Ceiling
// ============================================================================

/// Maximum number of faucets a basin composition admits.
///
/// - All basins `E_DRAIN`: `max(1, n - 1)` (faucets only fit between basins)
/// - Otherwise: 2 for up to two basins, 3 beyond that
/// - No basins: 0
pub fn faucet_ceiling(basins: &[BasinConfig]) -> usize {
    let count = basins.len();
    if count == 0 {
        return 0;
    }

    let all_drain = basins
        .iter()
        .all(|b| basin_kind(b) == Some(BasinKind::EDrain));
    if all_drain {
        return (count - 1).max(1);
    }

    if count <= 2 { 2 } else { 3 }
}

// ============================================================================
// Placement Candidates
// ============================================================================

/// Every placement the basin layout allows, in deck order.
///
/// A basin center is offered unless the basin is `E_DRAIN`; the gap between
/// basin N and N+1 is offered whenever basin N+1 exists.
pub fn legal_placements(basins: &[BasinConfig]) -> Vec<Placement> {
    let mut placements = Vec::new();
    for (i, basin) in basins.iter().enumerate() {
        let number = i + 1;
        if basin_kind(basin) != Some(BasinKind::EDrain) {
            placements.push(Placement::Center(number));
        }
        if number < basins.len() {
            placements.push(Placement::Between(number));
        }
    }
    placements
}

/// Placements still open to the faucet at `for_index`.
///
/// Excludes placements held by any other faucet in the build. Pass `None`
/// when asking on behalf of a faucet that does not exist yet.
pub fn placement_candidates(
    basins: &[BasinConfig],
    faucets: &[FaucetConfig],
    for_index: Option<usize>,
) -> Vec<Placement> {
    let taken: Vec<Placement> = faucets
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != for_index)
        .filter_map(|(_, f)| f.placement)
        .collect();

    legal_placements(basins)
        .into_iter()
        .filter(|p| !taken.contains(p))
        .collect()
}

// ============================================================================
// Repairs
// ============================================================================

fn faucet_facet(index: usize) -> String {
    format!("faucet[{}]", index + 1)
}

/// Re-validate every faucet placement against the current basin layout.
///
/// Valid, unique placements are kept first (earlier faucets win ties); every
/// other faucet moves to the first free legal placement, or becomes unplaced
/// when none is left.
pub fn repair_placements(config: &mut Configuration) -> Vec<Diagnostic> {
    let legal = legal_placements(&config.basins);
    let mut taken: Vec<Placement> = Vec::new();
    let mut needs_slot: Vec<usize> = Vec::new();
    let mut diagnostics = Vec::new();

    for (i, faucet) in config.faucets.iter().enumerate() {
        match faucet.placement {
            Some(p) if legal.contains(&p) && !taken.contains(&p) => taken.push(p),
            _ => needs_slot.push(i),
        }
    }

    for i in needs_slot {
        let previous = config.faucets[i].placement;
        let next = legal.iter().copied().find(|p| !taken.contains(p));
        if let Some(p) = next {
            taken.push(p);
        }
        if previous == next {
            continue;
        }

        config.faucets[i].placement = next;
        let message = match (previous, next) {
            (Some(old), Some(new)) => format!("placement {} is not available, moved to {}", old, new),
            (None, Some(new)) => format!("assigned placement {}", new),
            (Some(old), None) => format!("placement {} is not available and no free placement remains", old),
            (None, None) => continue,
        };
        diagnostics.push(Diagnostic::repair(faucet_facet(i), message));
    }

    diagnostics
}

/// Append a DI gooseneck faucet when an `E_SINK_DI` basin has none.
///
/// Prefers the DI basin's own center, then the first free legal placement.
pub fn inject_mandatory_faucets(config: &mut Configuration) -> Vec<Diagnostic> {
    let di_basin = config
        .basins
        .iter()
        .position(|b| basin_kind(b) == Some(BasinKind::ESinkDi));
    let Some(di_basin) = di_basin else {
        return Vec::new();
    };

    let has_gooseneck = config
        .faucets
        .iter()
        .any(|f| f.type_id.as_deref().is_some_and(is_di_gooseneck));
    if has_gooseneck {
        return Vec::new();
    }

    let candidates = placement_candidates(&config.basins, &config.faucets, None);
    let own_slot = Placement::Center(di_basin + 1);
    let placement = if candidates.contains(&own_slot) {
        Some(own_slot)
    } else {
        candidates.first().copied()
    };

    config
        .faucets
        .push(FaucetConfig::new(DI_GOOSENECK_FAUCET, placement));

    let facet = faucet_facet(config.faucets.len() - 1);
    let at = placement
        .map(|p| p.to_string())
        .unwrap_or_else(|| "no free placement".to_string());
    let mut diagnostics = vec![Diagnostic::repair(
        &facet,
        format!("added DI gooseneck faucet required by basin {} ({})", di_basin + 1, at),
    )];

    if placement.is_none() {
        let holder = config
            .faucets
            .iter()
            .position(|f| f.placement == Some(own_slot))
            .map(|i| format!("{} holds {}", faucet_facet(i), own_slot))
            .unwrap_or_else(|| format!("{} is not a legal placement", own_slot));
        diagnostics.push(Diagnostic::repair(
            facet,
            format!("DI gooseneck faucet left unplaced: every placement is taken and {}", holder),
        ));
    }

    diagnostics
}

/// Drop faucets beyond the ceiling, newest first, keeping one DI gooseneck
/// whenever a DI basin requires it.
pub fn enforce_faucet_ceiling(config: &mut Configuration) -> Vec<Diagnostic> {
    let ceiling = faucet_ceiling(&config.basins);
    let needs_gooseneck = config
        .basins
        .iter()
        .any(|b| basin_kind(b) == Some(BasinKind::ESinkDi));
    let mut diagnostics = Vec::new();
    while config.faucets.len() > ceiling {
        // Recomputed each pass: removals ahead of it shift the index
        let protected = if needs_gooseneck {
            config
                .faucets
                .iter()
                .position(|f| f.type_id.as_deref().is_some_and(is_di_gooseneck))
        } else {
            None
        };
        let victim = (0..config.faucets.len())
            .rev()
            .find(|i| Some(*i) != protected);
        let Some(victim) = victim else {
            break;
        };

        let removed = config.faucets.remove(victim);
        diagnostics.push(Diagnostic::repair(
            faucet_facet(victim),
            format!(
                "removed faucet '{}': build allows at most {} faucets",
                removed.type_id.as_deref().unwrap_or("unselected"),
                ceiling
            ),
        ));
    }

    diagnostics
}

// ============================================================================
// Mutators (repair-on-change)
// ============================================================================

/// Select a sink model. A basin list of the wrong length is replaced by
/// exactly N empty slots, then faucet placements are repaired.
pub fn select_sink_model(
    config: &mut Configuration,
    model_id: &str,
    catalog: &Catalog,
) -> Vec<Diagnostic> {
    config.sink_model_id = Some(model_id.to_string());

    let Some(model) = catalog.sink_model(model_id) else {
        return vec![Diagnostic::resolution(
            "sinkModel",
            format!("unknown sink model '{}', basin list left unchanged", model_id),
        )];
    };

    let mut diagnostics = Vec::new();
    if config.basins.len() != model.basin_count {
        debug!(
            "Model {} regenerates {} basin slots (had {})",
            model_id,
            model.basin_count,
            config.basins.len()
        );
        config.basins = vec![BasinConfig::default(); model.basin_count];
        diagnostics.push(Diagnostic::repair(
            "basins",
            format!("reset to {} empty basins for model {}", model.basin_count, model_id),
        ));
    }

    diagnostics.extend(repair_placements(config));
    diagnostics
}

/// Change the type of basin `index` (zero-based) and repair placements.
pub fn set_basin_type(config: &mut Configuration, index: usize, type_id: &str) -> Vec<Diagnostic> {
    let Some(basin) = config.basins.get_mut(index) else {
        return vec![Diagnostic::resolution(
            format!("basin[{}]", index + 1),
            format!("no basin slot {} in this build", index + 1),
        )];
    };
    basin.type_id = Some(type_id.to_string());
    repair_placements(config)
}

/// Remove basin `index` (zero-based) and repair placements.
pub fn remove_basin(config: &mut Configuration, index: usize) -> Vec<Diagnostic> {
    if index >= config.basins.len() {
        return vec![Diagnostic::resolution(
            format!("basin[{}]", index + 1),
            format!("no basin slot {} in this build", index + 1),
        )];
    }
    config.basins.remove(index);
    repair_placements(config)
}

// ============================================================================
// Full Pass
// ============================================================================

/// Run every rule over a snapshot: repair, inject, cap, then place anything
/// the cap freed up.
pub fn apply_rules(config: &mut Configuration) -> Vec<Diagnostic> {
    let mut diagnostics = repair_placements(config);
    diagnostics.extend(inject_mandatory_faucets(config));
    diagnostics.extend(enforce_faucet_ceiling(config));
    diagnostics.extend(repair_placements(config));
    diagnostics
}

// ============================================================================
// Tests
// ============================================================================
