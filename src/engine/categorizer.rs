//! Category assignment.
//!
//! An ordered list of rules, evaluated first match wins:
//!
//! 1. A category the node already carries (set by the assembler or the catalog)
//! 2. Numeric part-number prefix ranges (`702.10` → prefix `702`)
//! 3. Case-insensitive keyword match over identifier and name
//! 4. `OTHER`
//!
//! Rules come from the catalog, so a new part family is a data change.
//! Identical `(id, name, category)` input always yields the same category.

use crate::catalog::Catalog;
use crate::engine::bom::BomNode;
use crate::types::Category;

/// A single categorization rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRule {
    /// Keep whatever category the node already has
    Explicit,
    /// Leading digits of the id fall within `start..=end`
    PrefixRange { start: u32, end: u32, category: Category },
    /// Any keyword occurs in the lower-cased id or name
    Keywords { keywords: Vec<String>, category: Category },
}

impl CategoryRule {
    fn apply(&self, id: &str, name: &str, explicit: Option<Category>) -> Option<Category> {
        match self {
            Self::Explicit => explicit,
            Self::PrefixRange { start, end, category } => numeric_prefix(id)
                .filter(|prefix| (*start..=*end).contains(prefix))
                .map(|_| *category),
            Self::Keywords { keywords, category } => {
                let id = id.to_lowercase();
                let name = name.to_lowercase();
                keywords
                    .iter()
                    .any(|k| id.contains(k.as_str()) || name.contains(k.as_str()))
                    .then_some(*category)
            }
        }
    }
}

/// Digits before the first non-digit character, if any.
pub fn numeric_prefix(id: &str) -> Option<u32> {
    let digits: String = id.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Explicit, then the catalog's prefix ranges, then its keyword rules.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut rules = vec![CategoryRule::Explicit];
        rules.extend(catalog.category_ranges.iter().map(|r| CategoryRule::PrefixRange {
            start: r.start,
            end: r.end,
            category: r.category,
        }));
        rules.extend(catalog.keyword_rules.iter().map(|r| CategoryRule::Keywords {
            keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
            category: r.category,
        }));
        Self::new(rules)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn categorize(&self, id: &str, name: &str, explicit: Option<Category>) -> Category {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(id, name, explicit))
            .unwrap_or(Category::Other)
    }

    /// Fill in the category of every node in the tree.
    pub fn assign(&self, nodes: &mut [BomNode]) {
        for node in nodes {
            node.category = Some(self.categorize(&node.id, &node.name, node.category));
            self.assign(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccessoryKind;

    fn builtin() -> Categorizer {
        Categorizer::from_catalog(&Catalog::builtin())
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("702.10"), Some(702));
        assert_eq!(numeric_prefix("711"), Some(711));
        assert_eq!(numeric_prefix("T2-B1"), None);
        assert_eq!(numeric_prefix(""), None);
    }

    #[test]
    fn test_prefix_ranges() {
        let c = builtin();
        assert_eq!(c.categorize("711.97", "", None), Category::SinkBody);
        assert_eq!(
            c.categorize("702.10", "", None),
            Category::Accessory(AccessoryKind::Storage)
        );
        assert_eq!(c.categorize("741.01", "", None), Category::ControlBox);
        assert_eq!(c.categorize("751.05", "", None), Category::ServicePart);
    }

    #[test]
    fn test_explicit_category_wins() {
        let c = builtin();
        assert_eq!(c.categorize("702.10", "", Some(Category::Basin)), Category::Basin);
    }

    #[test]
    fn test_keywords_match_id_or_name_case_insensitively() {
        let c = builtin();
        assert_eq!(c.categorize("T2-CTRL-EDR1", "", None), Category::ControlBox);
        assert_eq!(
            c.categorize("X-1", "Pegboard Hook Set", None),
            Category::Accessory(AccessoryKind::Organization)
        );
        assert_eq!(c.categorize("T2-DL27-KIT", "Height Adjustable LEG Kit", None), Category::SinkBody);
    }

    #[test]
    fn test_keyword_order_matters() {
        // "Basin Light Kit" hits the basin rule before the lighting rule
        let c = builtin();
        assert_eq!(c.categorize("T2-OA-BASIN-LIGHT-ESK-KIT", "Basin Light Kit", None), Category::Basin);
    }

    #[test]
    fn test_unknown_falls_back_to_other() {
        let c = builtin();
        assert_eq!(c.categorize("999.99", "Mystery", None), Category::Other);
        assert_eq!(c.categorize("ZZZ", "", None), Category::Other);
    }

    #[test]
    fn test_empty_catalog_still_honours_explicit() {
        let c = Categorizer::from_catalog(&Catalog::empty());
        assert_eq!(c.rules().len(), 1);
        assert_eq!(c.categorize("702.10", "", None), Category::Other);
        assert_eq!(c.categorize("702.10", "", Some(Category::System)), Category::System);
    }

    #[test]
    fn test_assign_recurses() {
        let mut root = BomNode::new("T2-B3", "T2 Sink, 3 Basins", 1, "sinkBody")
            .with_category(Some(Category::SinkBody));
        root.children.push(BomNode::new("713.10", "Backsplash Panel", 1, "sinkBody"));
        root.children[0]
            .children
            .push(BomNode::new("ZZZ", "ZZZ", 1, "sinkBody"));

        let mut nodes = vec![root];
        builtin().assign(&mut nodes);
        assert_eq!(nodes[0].children[0].category, Some(Category::SinkBody));
        assert_eq!(nodes[0].children[0].children[0].category, Some(Category::Other));
    }
}
