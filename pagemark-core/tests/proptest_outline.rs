//! Property-based tests for outline reconstruction and page resolution
//!
//! Random outline shapes are serialized to object text with consistent
//! links, then parsed back and checked against the generated shape.

use pagemark::{
    build_tree, ObjectRef, OutlineNode, OutlineSource, PageLabelTable, PageRangeResolver,
    ResolverOptions,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Shape {
    children: Vec<Shape>,
}

impl Shape {
    fn size(&self) -> usize {
        1 + self.children.iter().map(Shape::size).sum::<usize>()
    }
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = Just(Shape { children: vec![] });
    leaf.prop_recursive(4, 40, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(|children| Shape { children })
    })
}

/// Serialize a shape with objects numbered in pre-order from 1
fn serialize(shape: &Shape) -> String {
    let mut text = String::from("%PDF-1.7\n");
    let mut next_id = 1;
    write_node(shape, None, None, None, &mut next_id, &mut text);
    text
}

fn write_node(
    shape: &Shape,
    parent: Option<u32>,
    prev: Option<u32>,
    next: Option<u32>,
    next_id: &mut u32,
    text: &mut String,
) -> u32 {
    let id = *next_id;
    *next_id += 1;

    // Each child subtree takes a consecutive block of numbers
    let mut child_ids = Vec::new();
    let mut cursor = id + 1;
    for child in &shape.children {
        child_ids.push(cursor);
        cursor += child.size() as u32;
    }

    let mut dict = String::new();
    if parent.is_some() {
        dict.push_str(&format!("/Title(Entry {})", id));
    }
    if let Some(parent) = parent {
        dict.push_str(&format!("/Parent {} 0 R", parent));
    }
    if let Some(prev) = prev {
        dict.push_str(&format!("/Prev {} 0 R", prev));
    }
    if let Some(next) = next {
        dict.push_str(&format!("/Next {} 0 R", next));
    }
    if let (Some(first), Some(last)) = (child_ids.first(), child_ids.last()) {
        dict.push_str(&format!("/First {} 0 R/Last {} 0 R", first, last));
    }
    dict.push_str(&format!("/Count {}", shape.size() - 1));
    if parent.is_some() {
        dict.push_str(&format!("/Dest[{} 0 R/Fit]", id));
    }
    text.push_str(&format!("{} 0 obj\n<<{}>>\nendobj\n", id, dict));

    for (i, child) in shape.children.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| child_ids[j]);
        let next = child_ids.get(i + 1).copied();
        write_node(child, Some(id), prev, next, next_id, text);
    }
    id
}

fn assert_same_shape(node: &OutlineNode, shape: &Shape) {
    assert_eq!(node.children.len(), shape.children.len());
    for (child, child_shape) in node.children.iter().zip(&shape.children) {
        assert_eq!(child.entry.depth, node.entry.depth + 1);
        assert_same_shape(child, child_shape);
    }
}

proptest! {
    #[test]
    fn test_child_lists_match_declared_structure(shape in shape_strategy()) {
        let source = OutlineSource::from_text(serialize(&shape));
        let index = source.parse(None).unwrap();
        let tree = build_tree(&index, &ObjectRef::new("1 0 R")).unwrap();

        assert_same_shape(&tree, &shape);
    }

    #[test]
    fn test_flatten_yields_every_node_in_preorder(shape in shape_strategy()) {
        let source = OutlineSource::from_text(serialize(&shape));
        let index = source.parse(None).unwrap();
        let tree = build_tree(&index, &ObjectRef::new("1 0 R")).unwrap();

        let flat = tree.flatten();
        prop_assert_eq!(flat.len(), shape.size());

        // Objects were numbered in pre-order
        let ids: Vec<Option<u32>> = flat.iter().map(|entry| entry.id.number()).collect();
        let expected: Vec<Option<u32>> = (1..=shape.size() as u32).map(Some).collect();
        prop_assert_eq!(ids, expected);

        let lazy: Vec<_> = tree.iter().cloned().collect();
        prop_assert_eq!(lazy, flat);
    }

    #[test]
    fn test_page_ranges_round_trip(
        shape in shape_strategy(),
        fillers in prop::collection::vec(0u32..4, 1..60),
    ) {
        let source = OutlineSource::from_text(serialize(&shape));
        let index = source.parse(None).unwrap();
        let tree = build_tree(&index, &ObjectRef::new("1 0 R")).unwrap();
        let mut entries = tree.flatten();

        // Each destination page is followed by its filler pages
        let mut labels = vec!["0 0 R".to_string()];
        let mut expected = Vec::new();
        for (i, entry) in entries.iter().skip(1).enumerate() {
            let count = fillers[i % fillers.len()];
            let start = labels.len() as u32 + 1;
            labels.push(entry.id.to_string());
            for f in 0..count {
                labels.push(format!("{} 0 R", 5000 + i as u32 * 10 + f));
            }
            expected.push((start, start + count));
        }
        labels.push("0 0 R".to_string());
        let table = PageLabelTable::from_labels(&labels);

        let options = ResolverOptions::default().with_toc_threshold(1);
        let resolver = PageRangeResolver::new(&table, options);
        let first = resolver.resolve(&mut entries).unwrap();
        let second = resolver.resolve(&mut entries).unwrap();
        prop_assert_eq!(&first, &second);

        let ranges: Vec<(u32, u32)> = first
            .articles
            .iter()
            .map(|article| (article.start_page, article.end_page))
            .collect();
        prop_assert_eq!(ranges, expected);
        prop_assert_eq!(first.structural, 1);
    }
}
