//! Duplicate merging and tree flattening.
//!
//! Two nodes are the same line item when both `id` and `name` match. The
//! assembler names every id one way, so in practice the id alone decides.
//!
//! # Merge Rules
//!
//! | Field             | Merged value |
//! |-------------------|--------------|
//! | `quantity`        | Sum |
//! | `source_contexts` | Concatenated in input order |
//! | `children`        | Concatenated, not re-merged |
//! | `category`        | First one present |
//!
//! Output order is the order in which each key was first seen.

use std::collections::HashMap;

use crate::engine::bom::BomNode;

/// Merge nodes that share `(id, name)`, one level deep.
pub fn aggregate(nodes: impl IntoIterator<Item = BomNode>) -> Vec<BomNode> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut merged: Vec<BomNode> = Vec::new();

    for node in nodes {
        let key = (node.id.clone(), node.name.clone());
        match index.get(&key) {
            Some(&i) => {
                let target = &mut merged[i];
                target.quantity = target.quantity.saturating_add(node.quantity);
                target.source_contexts.extend(node.source_contexts);
                target.children.extend(node.children);
                if target.category.is_none() {
                    target.category = node.category;
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(node);
            }
        }
    }

    merged
}

/// Every node in the tree, pre-order, with extended quantities and no children.
///
/// A child's extended quantity is its own quantity times every ancestor's.
pub fn flatten(nodes: &[BomNode]) -> Vec<BomNode> {
    fn walk(node: &BomNode, multiplier: u32, out: &mut Vec<BomNode>) {
        let extended = node.quantity.saturating_mul(multiplier);
        out.push(BomNode {
            id: node.id.clone(),
            name: node.name.clone(),
            quantity: extended,
            category: node.category,
            children: Vec::new(),
            source_contexts: node.source_contexts.clone(),
        });
        for child in &node.children {
            walk(child, extended, out);
        }
    }

    let mut out = Vec::new();
    for node in nodes {
        walk(node, 1, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn node(id: &str, quantity: u32, context: &str) -> BomNode {
        BomNode::new(id, format!("Part {}", id), quantity, context)
    }

    #[test]
    fn test_duplicates_sum_and_keep_contexts() {
        let merged = aggregate(vec![node("X", 2, "a"), node("X", 3, "b")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].quantity, 5);
        assert_eq!(merged[0].source_contexts, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let merged = aggregate(vec![
            node("B", 1, "1"),
            node("A", 1, "2"),
            node("B", 1, "3"),
            node("C", 1, "4"),
        ]);
        let ids: Vec<&str> = merged.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_same_id_different_name_stay_separate() {
        let merged = aggregate(vec![
            BomNode::new("T2-ADW-PB-6036", "Pegboard Panel 6036", 1, "pegboard.size"),
            BomNode::new("T2-ADW-PB-6036", "T2-ADW-PB-6036", 1, "accessory[1]"),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_children_concatenate_without_remerge() {
        let mut first = node("K", 1, "a");
        first.children.push(node("C", 1, "a"));
        let mut second = node("K", 1, "b");
        second.children.push(node("C", 1, "b"));

        let merged = aggregate(vec![first, second]);
        assert_eq!(merged[0].children.len(), 2);
    }

    #[test]
    fn test_first_present_category_wins() {
        let uncategorized = node("X", 1, "a");
        let basin = node("X", 1, "b").with_category(Some(Category::Basin));
        let control = node("X", 1, "c").with_category(Some(Category::ControlBox));

        let merged = aggregate(vec![uncategorized, basin, control]);
        assert_eq!(merged[0].category, Some(Category::Basin));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let once = aggregate(vec![node("X", 2, "a"), node("Y", 1, "b"), node("X", 1, "c")]);
        let twice = aggregate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(Vec::new()).is_empty());
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_flatten_multiplies_by_ancestors() {
        let mut legs = node("T2-DL27-KIT", 2, "legs");
        legs.children.push(node("715.27", 4, "legs"));
        let flat = flatten(&[legs]);

        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].quantity, 2);
        assert_eq!(flat[1].id, "715.27");
        assert_eq!(flat[1].quantity, 8);
        assert!(flat.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn test_flatten_then_aggregate_merges_shared_children() {
        let mut esk = node("T2-BSN-ESK-KIT", 1, "basin[1]");
        esk.children.push(node("722.11", 1, "basin[1]"));
        let mut edr = node("T2-BSN-EDR-KIT", 1, "basin[2]");
        edr.children.push(node("722.11", 1, "basin[2]"));

        let flat = aggregate(flatten(&[esk, edr]));
        let overflow = flat.iter().find(|n| n.id == "722.11").unwrap();
        assert_eq!(overflow.quantity, 2);
        assert!(overflow.is_aggregated());
    }
}
