//! BOM Assembler
//!
//! Expands a resolved, rule-checked configuration into a tree of `BomNode`s.
//!
//! # Emission Order
//!
//! | Section      | Nodes |
//! |--------------|-------|
//! | Sink body    | Model kit → legs, feet, pegboard (size panel, color kit), drawers |
//! | Basins       | Basin kit → size (custom placeholder), add-ons |
//! | Faucets      | Faucet kit per faucet |
//! | Sprayers     | Sprayer kit per sprayer |
//! | Control box  | Control box kit |
//! | Accessories  | One node per accessory line |
//!
//! Catalog kit definitions are expanded under every node whose id they name.
//! Pegboard parts ordered as accessories are built by the same helpers as the
//! nested pegboard, so the two spellings carry one name and merge.
//! Order is fixed so that two compilations of one snapshot are identical.

use crate::catalog::{Catalog, PEGBOARD_COLOR_KIT_PREFIX, PEGBOARD_PREFIX};
use crate::config_file::Configuration;
use crate::diagnostics::Diagnostic;
use crate::engine::bom::BomNode;
use crate::logic::resolver::{resolve_basin_size, resolve_pegboard_kit, CUSTOM_BASIN_NAME};
use crate::types::{AccessoryKind, Category};

/// Kit nesting deeper than this is treated as a catalog cycle.
const MAX_KIT_DEPTH: usize = 8;

/// Raw tree plus anything the assembler could not place.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub nodes: Vec<BomNode>,
    pub diagnostics: Vec<Diagnostic>,
}

struct Assembler<'a> {
    catalog: &'a Catalog,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Assembler<'a> {
    /// Node for a catalog part with its catalog-defined children expanded.
    fn part(
        &mut self,
        id: &str,
        quantity: u32,
        context: &str,
        category: Option<Category>,
    ) -> BomNode {
        let name = match self.catalog.part_name(id) {
            Some(name) => name.to_string(),
            None => {
                self.diagnostics.push(Diagnostic::resolution(
                    context,
                    format!("'{}' is not in the catalog", id),
                ));
                id.to_string()
            }
        };
        let category = category.or_else(|| self.catalog.part_category(id));

        let mut node = BomNode::new(id, name, quantity.max(1), context).with_category(category);
        node.children = self.kit_children(id, context, 0);
        node
    }

    fn kit_children(&mut self, kit_id: &str, context: &str, depth: usize) -> Vec<BomNode> {
        let catalog = self.catalog;
        let children = catalog.kit_children(kit_id);
        if children.is_empty() {
            return Vec::new();
        }
        if depth >= MAX_KIT_DEPTH {
            self.diagnostics.push(Diagnostic::resolution(
                context,
                format!("kit '{}' nests deeper than {} levels, expansion stopped", kit_id, MAX_KIT_DEPTH),
            ));
            return Vec::new();
        }

        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            let mut node = BomNode::new(&child.id, &child.name, child.quantity.max(1), context);
            node.category = catalog.part_category(&child.id);
            node.children = self.kit_children(&child.id, context, depth + 1);
            nodes.push(node);
        }
        nodes
    }

    fn sink_body(&mut self, config: &Configuration) -> Vec<BomNode> {
        let mut parts = Vec::new();

        if let Some(legs) = config.legs_type_id.as_deref() {
            parts.push(self.part(legs, 1, "legs", Some(Category::SinkBody)));
        }
        if let Some(feet) = config.feet_type_id.as_deref() {
            parts.push(self.part(feet, 1, "feet", Some(Category::SinkBody)));
        }
        if let Some(pegboard) = self.pegboard(config) {
            parts.push(pegboard);
        }
        for (i, drawer) in config.drawer_item_ids.iter().enumerate() {
            parts.push(self.part(drawer, 1, &format!("drawer[{}]", i + 1), None));
        }

        let Some(model_id) = config.sink_model_id.as_deref() else {
            // No body to hang them on: keep the parts as top-level items
            return parts;
        };

        let mut body = self.part(model_id, 1, "sinkBody", Some(Category::SinkBody));
        if let (Some(width), Some(length)) = (config.width, config.length) {
            body.name = format!("{} ({}\" x {}\")", body.name, width, length);
        }
        body.children.extend(parts);
        vec![body]
    }

    fn pegboard(&mut self, config: &Configuration) -> Option<BomNode> {
        if !config.pegboard.enabled {
            return None;
        }
        let type_id = config.pegboard.type_id.as_deref()?;
        let Some(length) = config.length else {
            self.diagnostics.push(Diagnostic::resolution(
                "pegboard",
                "sink length unknown, pegboard size cannot be chosen",
            ));
            return None;
        };

        let Some(kit) = resolve_pegboard_kit(
            length,
            type_id,
            config.pegboard.color_id.as_deref(),
            &self.catalog.pegboard,
        ) else {
            self.diagnostics.push(Diagnostic::resolution(
                "pegboard",
                "no pegboard coverage table loaded",
            ));
            return None;
        };
        for warning in &kit.warnings {
            self.diagnostics.push(Diagnostic::resolution("pegboard", warning.clone()));
        }

        Some(self.pegboard_kit(
            &kit.size_code,
            &kit.type_code,
            kit.color_code.as_deref(),
            "pegboard",
        ))
    }

    /// Composed pegboard kit with its panel and color kit nested.
    fn pegboard_kit(
        &self,
        size_code: &str,
        type_code: &str,
        color_code: Option<&str>,
        context: &str,
    ) -> BomNode {
        let mut node = BomNode::new(
            Catalog::pegboard_kit_id(size_code, type_code, color_code),
            format!("Pegboard Kit {} {}", size_code, type_code),
            1,
            context,
        )
        .with_category(Some(Category::Accessory(AccessoryKind::Organization)));

        node.children
            .push(self.pegboard_panel(size_code, &format!("{}.size", context)));
        if let Some(code) = color_code {
            node.children.push(self.color_kit(code, &format!("{}.color", context)));
        }
        node
    }

    fn pegboard_panel(&self, size_code: &str, context: &str) -> BomNode {
        BomNode::new(
            Catalog::pegboard_panel_id(size_code),
            format!("Pegboard Panel {}", size_code),
            1,
            context,
        )
        .with_category(Some(Category::Accessory(AccessoryKind::Organization)))
    }

    /// Pegboard color kit, named the same whether nested or standalone.
    fn color_kit(&self, code: &str, context: &str) -> BomNode {
        let color_name = self
            .catalog
            .pegboard
            .colors
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(code);
        BomNode::new(
            Catalog::pegboard_color_kit_id(code),
            format!("Pegboard Color Kit, {}", color_name),
            1,
            context,
        )
        .with_category(Some(Category::Accessory(AccessoryKind::Organization)))
    }

    /// A pegboard panel, color kit or composed kit ordered on its own.
    ///
    /// Built by the same helpers as the nested pegboard so both merge.
    fn standalone_pegboard(&self, id: &str, context: &str) -> Option<BomNode> {
        let table = &self.catalog.pegboard;

        if let Some(code) = id.strip_prefix(PEGBOARD_COLOR_KIT_PREFIX) {
            return table
                .colors
                .iter()
                .any(|c| c.code == code)
                .then(|| self.color_kit(code, context));
        }

        let rest = id.strip_prefix(PEGBOARD_PREFIX)?;
        let known_size = |size: &str| table.buckets.iter().any(|b| b.size_code == size);
        if known_size(rest) {
            return Some(self.pegboard_panel(rest, context));
        }

        let mut codes = rest.strip_suffix("-KIT")?.splitn(3, '-');
        let size_code = codes.next().filter(|&size| known_size(size))?;
        let type_code = codes
            .next()
            .filter(|code| table.types.iter().any(|t| t.code == *code))?;
        let color_code = match codes.next() {
            Some(code) if table.colors.iter().any(|c| c.code == code) => Some(code),
            Some(_) => return None,
            None => None,
        };
        Some(self.pegboard_kit(size_code, type_code, color_code, context))
    }

    fn basins(&mut self, config: &Configuration) -> Vec<BomNode> {
        let mut nodes = Vec::new();

        for (i, basin) in config.basins.iter().enumerate() {
            let facet = format!("basin[{}]", i + 1);
            let mut parts = Vec::new();

            if let Some(size) = resolve_basin_size(basin, self.catalog) {
                let mut node = BomNode::new(
                    &size.part_number,
                    &size.name,
                    1,
                    format!("{}.size", facet),
                )
                .with_category(Some(Category::Basin));
                node.children = self.kit_children(&size.part_number, &facet, 0);
                if let Some(placeholder) = &size.placeholder {
                    node.children.push(
                        BomNode::new(placeholder, CUSTOM_BASIN_NAME, 1, format!("{}.size", facet))
                            .with_category(Some(Category::Basin)),
                    );
                }
                parts.push(node);
            }
            for addon in &basin.addon_ids {
                parts.push(self.part(addon, 1, &format!("{}.addon", facet), None));
            }

            match basin.type_id.as_deref().filter(|t| !t.trim().is_empty()) {
                Some(type_id) => {
                    let mut node = self.part(type_id, 1, &facet, Some(Category::Basin));
                    node.children.extend(parts);
                    nodes.push(node);
                }
                None => nodes.extend(parts),
            }
        }

        nodes
    }

    fn faucets(&mut self, config: &Configuration) -> Vec<BomNode> {
        let mut nodes = Vec::new();
        for (i, faucet) in config.faucets.iter().enumerate() {
            let Some(type_id) = faucet.type_id.as_deref() else {
                continue;
            };
            let context = match faucet.placement {
                Some(p) => format!("faucet[{}]@{}", i + 1, p),
                None => format!("faucet[{}]", i + 1),
            };
            nodes.push(self.part(type_id, faucet.quantity, &context, Some(Category::FaucetSprayer)));
        }
        nodes
    }

    fn sprayers(&mut self, config: &Configuration) -> Vec<BomNode> {
        let mut nodes = Vec::new();
        for (i, sprayer) in config.sprayers.iter().enumerate() {
            let Some(type_id) = sprayer.type_id.as_deref() else {
                continue;
            };
            let context = match sprayer.location.as_deref() {
                Some(location) => format!("sprayer[{}]@{}", i + 1, location),
                None => format!("sprayer[{}]", i + 1),
            };
            nodes.push(self.part(type_id, 1, &context, Some(Category::FaucetSprayer)));
        }
        nodes
    }

    fn accessories(&mut self, config: &Configuration) -> Vec<BomNode> {
        let mut nodes = Vec::new();
        for (i, accessory) in config.accessories.iter().enumerate() {
            let context = format!("accessory[{}]", i + 1);
            let node = match self.standalone_pegboard(&accessory.id, &context) {
                Some(mut node) => {
                    node.quantity = accessory.quantity.max(1);
                    node
                }
                None => self.part(&accessory.id, accessory.quantity, &context, None),
            };
            nodes.push(node);
        }
        nodes
    }
}

/// Expand a configuration into the raw (not yet aggregated) BOM tree.
pub fn assemble(config: &Configuration, catalog: &Catalog) -> Assembly {
    let mut assembler = Assembler {
        catalog,
        diagnostics: Vec::new(),
    };

    let mut nodes = assembler.sink_body(config);
    nodes.extend(assembler.basins(config));
    nodes.extend(assembler.faucets(config));
    nodes.extend(assembler.sprayers(config));
    if let Some(control_box) = config.control_box_id.as_deref() {
        nodes.push(assembler.part(control_box, 1, "controlBox", Some(Category::ControlBox)));
    }
    nodes.extend(assembler.accessories(config));

    Assembly {
        nodes,
        diagnostics: assembler.diagnostics,
    }
}
