//! BOM node and compilation result types.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config_file::Configuration;
use crate::diagnostics::{Diagnostic, MissingField};
use crate::types::Category;

/// One part or assembly in the BOM tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomNode {
    /// Resolved catalog identifier
    pub id: String,
    pub name: String,
    /// Quantity per parent (or per build, for top-level nodes)
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BomNode>,
    /// Configuration facets that contributed this node
    #[serde(default)]
    pub source_contexts: Vec<String>,
}

impl BomNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        context: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            category: None,
            children: Vec::new(),
            source_contexts: vec![context.into()],
        }
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(BomNode::node_count).sum::<usize>()
    }

    /// True when more than one facet contributed to this node
    pub fn is_aggregated(&self) -> bool {
        self.source_contexts.len() > 1
    }
}

/// Render a BOM tree as indented text for previews and debugging.
pub fn render_tree(nodes: &[BomNode]) -> String {
    fn walk(node: &BomNode, depth: usize, lines: &mut Vec<String>) {
        let category = node
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        let mut line = format!(
            "{}{} x{}  {}  [{}]",
            "  ".repeat(depth),
            node.id,
            node.quantity,
            node.name,
            category
        );
        if node.is_aggregated() {
            line.push_str(&format!("  (aggregated from {} sources)", node.source_contexts.len()));
        }
        lines.push(line);
        for child in &node.children {
            walk(child, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    for node in nodes {
        walk(node, 0, &mut lines);
    }
    lines.join("\n")
}

/// Everything one compilation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomResult {
    /// Top-level facets with nested sub-kits, duplicates merged one level deep
    pub hierarchical: Vec<BomNode>,
    /// Every part once, with extended quantities and no children
    pub flattened: Vec<BomNode>,
    /// Number of line items in `flattened`
    pub total_items: usize,
    /// Number of roots in `hierarchical`
    pub top_level_items: usize,
    /// The resolved, rule-repaired configuration the BOM was built from
    pub configuration: Configuration,
    pub diagnostics: Vec<Diagnostic>,
    pub missing_fields: Vec<MissingField>,
    pub catalog_version: String,
}

impl BomResult {
    /// True when no mandatory facet is missing
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }

    /// Sum of all flattened quantities
    pub fn total_quantity(&self) -> u64 {
        self.flattened.iter().map(|n| u64::from(n.quantity)).sum()
    }

    /// Flattened items in one category
    pub fn by_category(&self, category: Category) -> Vec<&BomNode> {
        self.flattened
            .iter()
            .filter(|n| n.category == Some(category))
            .collect()
    }

    /// Flattened items grouped by category, in `Category::ALL` order.
    /// Empty groups are omitted.
    pub fn grouped_by_category(&self) -> Vec<(Category, Vec<&BomNode>)> {
        Category::ALL
            .iter()
            .map(|c| (*c, self.by_category(*c)))
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }

    /// Leg and foot items, the subset procurement orders separately
    pub fn procurement_items(&self, catalog: &Catalog) -> Vec<&BomNode> {
        self.flattened
            .iter()
            .filter(|n| catalog.is_leg_or_foot(&n.id))
            .collect()
    }

    /// Summary for logging/display
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("BOM (catalog {})", self.catalog_version),
            format!("  Top-level items: {}", self.top_level_items),
            format!("  Line items: {}", self.total_items),
            format!("  Total quantity: {}", self.total_quantity()),
        ];
        if !self.missing_fields.is_empty() {
            lines.push(format!("  Missing ({}):", self.missing_fields.len()));
            for field in &self.missing_fields {
                lines.push(format!("    - {}", field));
            }
        }
        if !self.diagnostics.is_empty() {
            lines.push(format!("  Diagnostics ({}):", self.diagnostics.len()));
            for diagnostic in &self.diagnostics {
                lines.push(format!("    - {}", diagnostic));
            }
        }
        lines.join("\n")
    }
}
