//! Tests for hierarchy reconstruction

use std::collections::HashMap;

use rstest::rstest;

use svgtree::domain::{ingest, DomainError, HierarchyBuilder, HierarchyGraph, Row};

fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Header plus one bare element row per `(id, parent_id, tag)`.
fn table(entries: &[(&str, &str, &str)]) -> Vec<Row> {
    let mut rows = vec![row(&["ID", "ParentID", "Depth", "Tag", "Attribute", "Value"])];
    rows.extend(
        entries
            .iter()
            .map(|&(id, parent, tag)| row(&[id, parent, "0", tag, "", ""])),
    );
    rows
}

fn build(rows: &[Row]) -> Result<HierarchyGraph, DomainError> {
    HierarchyBuilder::build(ingest(rows)?)
}

/// Roots plus every children list, flattened.
fn placed_ids(graph: &HierarchyGraph) -> Vec<String> {
    let mut ids: Vec<String> = graph.roots().to_vec();
    for children in graph.children().values() {
        ids.extend(children.iter().cloned());
    }
    ids.sort();
    ids
}

#[test]
fn given_example_rows_when_building_then_returns_roots_and_children() {
    let rows = vec![
        row(&["ID", "ParentID", "Depth", "Tag", "Attribute", "Value"]),
        row(&["1", "-1", "0", "svg", "", ""]),
        row(&["1", "-1", "0", "svg", "width", "100"]),
        row(&["2", "1", "1", "rect", "", ""]),
        row(&["2", "1", "1", "rect", "x", "5"]),
    ];

    let graph = build(&rows).unwrap();

    assert_eq!(graph.roots(), ["1".to_string()]);
    let expected: HashMap<String, Vec<String>> =
        HashMap::from([("1".to_string(), vec!["2".to_string()])]);
    assert_eq!(graph.children(), &expected);
    assert_eq!(graph.depth(), 2);
    assert_eq!(graph.leaf_ids(), vec!["2"]);
}

#[test]
fn given_child_listed_before_parent_when_building_then_attaches_child() {
    let rows = table(&[("2", "1", "rect"), ("1", "-1", "svg")]);

    let graph = build(&rows).unwrap();

    assert_eq!(graph.roots(), ["1".to_string()]);
    assert_eq!(graph.children_of("1"), ["2".to_string()]);
}

#[test]
fn given_missing_parent_when_building_then_promotes_orphan_to_root() {
    let rows = table(&[("1", "-1", "svg"), ("5", "99", "g"), ("6", "5", "path")]);

    let graph = build(&rows).unwrap();

    assert_eq!(graph.roots(), ["1".to_string(), "5".to_string()]);
    assert_eq!(graph.children_of("5"), ["6".to_string()]);
    assert!(graph.children_of("99").is_empty());
}

#[test]
fn given_siblings_when_building_then_keeps_first_seen_order() {
    let rows = table(&[
        ("1", "-1", "svg"),
        ("4", "1", "circle"),
        ("2", "1", "rect"),
        ("3", "1", "path"),
    ]);

    let graph = build(&rows).unwrap();

    assert_eq!(
        graph.children_of("1"),
        ["4".to_string(), "2".to_string(), "3".to_string()]
    );
}

#[rstest]
#[case::mutual(&[("A", "B", "g"), ("B", "A", "g")])]
#[case::self_parent(&[("A", "A", "g")])]
#[case::long_loop(&[("1", "-1", "svg"), ("A", "C", "g"), ("B", "A", "g"), ("C", "B", "g")])]
fn given_parent_cycle_when_building_then_reports_cycle(#[case] entries: &[(&str, &str, &str)]) {
    let err = build(&table(entries)).unwrap_err();

    match err {
        DomainError::CycleDetected(id) => assert!(["A", "B", "C"].contains(&id.as_str())),
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[rstest]
#[case::single_root(&[("1", "-1", "svg"), ("2", "1", "g"), ("3", "2", "rect"), ("4", "1", "text")])]
#[case::forest(&[("1", "-1", "svg"), ("2", "-1", "svg"), ("3", "2", "g"), ("4", "1", "g")])]
#[case::orphans(&[("1", "x", "g"), ("2", "1", "g"), ("3", "y", "g"), ("4", "3", "g")])]
#[case::deep_chain(&[("4", "3", "g"), ("3", "2", "g"), ("2", "1", "g"), ("1", "-1", "svg")])]
fn given_acyclic_table_when_building_then_places_every_id_exactly_once(
    #[case] entries: &[(&str, &str, &str)],
) {
    let graph = build(&table(entries)).unwrap();

    let mut expected: Vec<String> = entries.iter().map(|(id, _, _)| id.to_string()).collect();
    expected.sort();
    assert_eq!(placed_ids(&graph), expected);
    assert_eq!(graph.iter().count(), entries.len());
}

#[test]
fn given_permuted_rows_when_building_then_structure_is_preserved() {
    let original = table(&[
        ("1", "-1", "svg"),
        ("2", "1", "g"),
        ("3", "2", "rect"),
        ("4", "2", "circle"),
    ]);
    let permuted = table(&[
        ("3", "2", "rect"),
        ("1", "-1", "svg"),
        ("4", "2", "circle"),
        ("2", "1", "g"),
    ]);

    let a = build(&original).unwrap();
    let b = build(&permuted).unwrap();

    assert_eq!(a.roots(), b.roots());
    assert_eq!(a.children(), b.children());
    let tags = |g: &HierarchyGraph| g.iter().map(|(d, n)| (d, n.tag.clone())).collect::<Vec<_>>();
    assert_eq!(tags(&a), tags(&b));
}

#[test]
fn given_deep_chain_when_iterating_then_does_not_recurse() {
    let mut rows = vec![row(&["ID", "ParentID", "Depth", "Tag", "Attribute", "Value"])];
    rows.push(row(&["0", "-1", "0", "svg", "", ""]));
    for i in 1..50_000 {
        let id = i.to_string();
        let parent = (i - 1).to_string();
        rows.push(row(&[id.as_str(), parent.as_str(), "0", "g", "", ""]));
    }

    let graph = build(&rows).unwrap();

    assert_eq!(graph.depth(), 50_000);
    assert_eq!(graph.leaf_ids(), vec!["49999"]);
}

#[test]
fn given_only_header_when_building_then_graph_is_empty() {
    let graph = build(&table(&[])).unwrap();
    assert!(graph.is_empty());
    assert_eq!(graph.depth(), 0);
}
