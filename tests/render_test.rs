//! Tests for indented rendering and the tree model

use rstest::{fixture, rstest};

use svgtree::domain::{
    ingest, HierarchyBuilder, HierarchyGraph, LineKind, ModelNodeKind, RenderOutcome,
    RenderStyle, Row, TreeModelBuilder, TreeNodeConvert, TreeRenderer,
};
use svgtree::util::testing;

fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

fn graph_from(rows: Vec<Row>) -> HierarchyGraph {
    HierarchyBuilder::build(ingest(&rows).unwrap()).unwrap()
}

fn example() -> HierarchyGraph {
    graph_from(vec![
        row(&["ID", "ParentID", "Depth", "Tag", "Attribute", "Value"]),
        row(&["1", "-1", "0", "svg", "", ""]),
        row(&["1", "-1", "0", "svg", "width", "100"]),
        row(&["2", "1", "1", "rect", "", ""]),
        row(&["2", "1", "1", "rect", "x", "5"]),
    ])
}

fn forest() -> HierarchyGraph {
    graph_from(vec![
        row(&["ID", "ParentID", "Depth", "Tag", "Attribute", "Value"]),
        row(&["1", "-1", "0", "svg", "viewBox", "0 0 10 10"]),
        row(&["2", "1", "1", "g", "id", "layer"]),
        row(&["3", "2", "2", "rect", "x", "1"]),
        row(&["3", "2", "2", "rect", "y", "2"]),
        row(&["4", "2", "2", "circle", "", ""]),
        row(&["5", "1", "1", "text", "", ""]),
        row(&["6", "-1", "0", "svg", "", ""]),
        row(&["7", "6", "1", "path", "d", "M0 0"]),
        row(&["8", "missing", "0", "g", "", ""]),
    ])
}

#[fixture]
fn example_graph() -> HierarchyGraph {
    testing::init_test_setup();
    example()
}

#[fixture]
fn forest_graph() -> HierarchyGraph {
    testing::init_test_setup();
    forest()
}

fn pairs(graph: &HierarchyGraph) -> Vec<(usize, String)> {
    TreeRenderer::default()
        .render(graph)
        .into_option()
        .unwrap()
        .map(|line| (line.depth, line.text))
        .collect()
}

#[rstest]
fn given_example_graph_when_rendering_then_attributes_precede_children(
    example_graph: HierarchyGraph,
) {
    assert_eq!(
        pairs(&example_graph),
        vec![
            (0, "svg".to_string()),
            (1, "width=\"100\"".to_string()),
            (1, "rect".to_string()),
            (2, "x=\"5\"".to_string()),
        ]
    );
}

#[rstest]
fn given_graph_when_rendering_then_line_kinds_match(example_graph: HierarchyGraph) {
    let kinds: Vec<LineKind> = TreeRenderer::default()
        .render(&example_graph)
        .into_option()
        .unwrap()
        .map(|line| line.kind)
        .collect();

    assert_eq!(
        kinds,
        vec![
            LineKind::Element,
            LineKind::Attribute,
            LineKind::Element,
            LineKind::Attribute
        ]
    );
}

#[rstest]
fn given_graph_when_rendering_twice_then_sequences_are_identical(forest_graph: HierarchyGraph) {
    assert_eq!(pairs(&forest_graph), pairs(&forest_graph));
}

#[rstest]
fn given_forest_when_rendering_in_parallel_then_matches_sequential(forest_graph: HierarchyGraph) {
    let renderer = TreeRenderer::default();
    let sequential: Vec<_> = renderer.render(&forest_graph).into_option().unwrap().collect();

    let parallel = renderer.render_parallel(&forest_graph).into_option().unwrap();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel.first().map(|l| l.as_pair()), Some((0, "svg")));
    assert_eq!(parallel.last().map(|l| l.as_pair()), Some((0, "g")));
}

#[rstest]
fn given_example_graph_when_rendering_to_string_then_indents_by_style(
    example_graph: HierarchyGraph,
) {
    let renderer = TreeRenderer::new(RenderStyle {
        color: false,
        indent: 2,
    });

    let text = renderer.render_to_string(&example_graph);

    assert_eq!(
        text,
        RenderOutcome::Ready("svg\n  width=\"100\"\n  rect\n    x=\"5\"".to_string())
    );
}

#[test]
fn given_empty_graph_when_rendering_then_reports_no_data() {
    let graph = graph_from(vec![row(&["ID", "ParentID", "Depth", "Tag", "Attribute", "Value"])]);

    assert!(TreeRenderer::default().render(&graph).is_empty());
    assert!(TreeModelBuilder::build_model(&graph).is_empty());
}

#[rstest]
fn given_example_graph_when_building_model_then_attribute_nodes_come_first(
    example_graph: HierarchyGraph,
) {
    let model = TreeModelBuilder::build_model(&example_graph)
        .into_option()
        .unwrap();

    assert_eq!(model.roots().len(), 1);
    let svg = model.get(model.roots()[0]).unwrap();
    let children: Vec<_> = svg
        .children
        .iter()
        .map(|&idx| model.get(idx).unwrap())
        .collect();
    assert_eq!(children.len(), 2);
    assert!(children[0].is_attribute());
    assert_eq!(
        children[1].kind,
        ModelNodeKind::Element {
            id: "2".to_string(),
            tag: "rect".to_string()
        }
    );
    assert_eq!(model.len(), 4);
    assert_eq!(model.depth(), 3);
    assert_eq!(model.leaf_labels(), vec!["width=\"100\"", "x=\"5\""]);
}

#[rstest]
#[case::single_tree(example())]
#[case::forest(forest())]
fn given_graph_when_comparing_model_and_lines_then_preorder_matches(#[case] graph: HierarchyGraph) {
    let model = TreeModelBuilder::build_model(&graph).into_option().unwrap();

    let from_model: Vec<(usize, String)> = model
        .iter()
        .map(|(depth, node)| (depth, node.label.clone()))
        .collect();

    assert_eq!(from_model, pairs(&graph));
}

#[rstest]
fn given_model_when_converting_to_termtree_then_draws_box_tree(example_graph: HierarchyGraph) {
    let model = TreeModelBuilder::build_model(&example_graph)
        .into_option()
        .unwrap();

    let trees = model.to_tree_string();

    assert_eq!(trees.len(), 1);
    let text = trees[0].to_string();
    assert_eq!(
        text,
        "svg\n├── width=\"100\"\n└── rect\n    └── x=\"5\"\n"
    );
}

#[rstest]
fn given_color_style_when_formatting_then_keeps_text(example_graph: HierarchyGraph) {
    colored::control::set_override(true);
    let renderer = TreeRenderer::new(RenderStyle {
        color: true,
        indent: 3,
    });
    let first = renderer.render(&example_graph).into_option().unwrap().next().unwrap();

    let formatted = renderer.format_line(&first);

    assert!(formatted.contains("svg"));
    assert!(formatted.contains("\u{1b}["));
}
