use super::*;
use pretty_assertions::assert_eq;

#[test]
fn empty_graph_has_nothing() {
    let graph: KeyedGraph<&str> = KeyedGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.get([]), None);
    assert_eq!(graph.get([0, 1]), None);
}

#[test]
fn insert_at_root() {
    let mut graph = KeyedGraph::new();
    assert_eq!(graph.insert_value("root", []), None);
    assert_eq!(graph.get([]), Some(&"root"));
    assert_eq!(graph.value(), Some(&"root"));
    assert_eq!(graph.len(), 1);
}

#[test]
fn insert_creates_empty_intermediates() {
    let mut graph = KeyedGraph::new();
    graph.insert_value("leaf", [1, 4, 2]);

    assert_eq!(graph.get([1, 4, 2]), Some(&"leaf"));
    assert_eq!(graph.get([1]), None);
    assert_eq!(graph.get([1, 4]), None);
    assert!(graph.subgraph([1, 4]).is_some());
    assert_eq!(graph.len(), 1);
}

#[test]
fn last_write_wins() {
    let mut graph = KeyedGraph::new();
    graph.insert_value("first", [0]);
    assert_eq!(graph.insert_value("second", [0]), Some("first"));
    assert_eq!(graph.get([0]), Some(&"second"));
}

#[test]
fn sibling_paths_stay_separate() {
    let mut graph = KeyedGraph::new();
    graph.insert_value("a", [0]);
    graph.insert_value("b", [1]);
    graph.insert_value("c", [0, 0]);

    assert_eq!(graph.get([0]), Some(&"a"));
    assert_eq!(graph.get([1]), Some(&"b"));
    assert_eq!(graph.get([0, 0]), Some(&"c"));
    assert_eq!(graph.get([1, 0]), None);
    assert_eq!(graph.len(), 3);
}

#[test]
fn children_iterate_in_segment_order() {
    let mut graph = KeyedGraph::new();
    graph.insert_value("two", [2]);
    graph.insert_value("zero", [0]);
    graph.insert_value("one", [1]);

    let order: Vec<_> = graph
        .children()
        .values()
        .filter_map(KeyedGraph::value)
        .copied()
        .collect();
    assert_eq!(order, vec!["zero", "one", "two"]);
}

#[test]
fn get_mut_updates_in_place() {
    let mut graph = KeyedGraph::new();
    graph.insert_value(1, [3]);
    if let Some(value) = graph.get_mut([3]) {
        *value += 41;
    }
    assert_eq!(graph.get([3]), Some(&42));
    assert_eq!(graph.get_mut([4]), None);
}

#[test]
fn value_mut_edits_the_node_itself() {
    let mut graph = KeyedGraph::with_value(String::from("a"));
    graph.insert_value(String::from("child"), [0]);
    if let Some(value) = graph.value_mut() {
        value.push('b');
    }
    assert_eq!(graph.value().map(String::as_str), Some("ab"));
    assert_eq!(graph.get([0]).map(String::as_str), Some("child"));

    let mut empty: KeyedGraph<String> = KeyedGraph::new();
    assert_eq!(empty.value_mut(), None);
}

#[test]
fn take_value_leaves_children() {
    let mut graph = KeyedGraph::with_value("root");
    graph.insert_value("child", [0]);
    assert_eq!(graph.take_value(), Some("root"));
    assert_eq!(graph.value(), None);
    assert_eq!(graph.get([0]), Some(&"child"));
}

#[test]
fn for_each_is_preorder_ascending() {
    let mut graph = KeyedGraph::new();
    graph.insert_value("root", []);
    graph.insert_value("1", [1]);
    graph.insert_value("0.5", [0, 5]);
    graph.insert_value("0", [0]);
    graph.insert_value("1.0", [1, 0]);

    let mut visited = Vec::new();
    graph.for_each(|path, value| visited.push((path.to_vec(), *value)));

    assert_eq!(
        visited,
        vec![
            (vec![], "root"),
            (vec![0], "0"),
            (vec![0, 5], "0.5"),
            (vec![1], "1"),
            (vec![1, 0], "1.0"),
        ]
    );
}

#[test]
fn into_parts_splits_node() {
    let mut graph = KeyedGraph::with_value("root");
    graph.insert_value("child", [7]);
    let (value, children) = graph.into_parts();
    assert_eq!(value, Some("root"));
    assert_eq!(children.keys().copied().collect::<Vec<_>>(), vec![7]);
}

#[test]
fn deep_paths_do_not_overflow() {
    let mut graph = KeyedGraph::new();
    let path: Vec<u32> = (0..500).map(|i| i % 3).collect();
    graph.insert_value("deep", path.iter().copied());
    assert_eq!(graph.get(path.iter().copied()), Some(&"deep"));
    assert_eq!(graph.len(), 1);
}
