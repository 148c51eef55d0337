use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::DisplayStyle;
use pretty_assertions::assert_eq;

struct Node {
    name: &'static str,
    next: Option<Rc<RefCell<Node>>>,
}

impl Reflect for Node {
    fn test_description(&self) -> String {
        format!("Node({})", self.name)
    }

    fn display_style(&self) -> DisplayStyle {
        DisplayStyle::Class
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
        visit(Some("name"), &self.name);
        visit(Some("next"), &self.next);
    }
}

fn shared(name: &'static str) -> Rc<RefCell<Node>> {
    Rc::new(RefCell::new(Node { name, next: None }))
}

fn descriptions(value: &Value) -> Vec<String> {
    value
        .children
        .iter()
        .flatten()
        .map(|child| child.description.clone())
        .collect()
}

#[test]
fn scalar_snapshot() {
    let value = Value::reflecting(&42u16, &ReflectOptions::default());
    assert_eq!(value.description, "42");
    assert_eq!(value.type_info, TypeInfo::of::<u16>());
    assert_eq!(value.children, None);
    assert!(!value.is_collection);
    assert!(!value.is_truncated);
    assert_eq!(value.to_string(), "42");
}

#[test]
fn collection_children_are_described() {
    let value = Value::reflecting(&vec![1, 2, 3], &ReflectOptions::default());
    assert!(value.is_collection);
    assert_eq!(descriptions(&value), vec!["1", "2", "3"]);
    assert_eq!(value.child_count(), 3);
}

#[test]
fn labels_are_kept() {
    let value = Value::reflecting(&(1, 2), &ReflectOptions::default());
    let labels: Vec<_> = value
        .children
        .iter()
        .flatten()
        .map(|child| child.label.clone())
        .collect();
    assert_eq!(labels, vec![Some(".0".to_owned()), Some(".1".to_owned())]);
}

#[test]
fn large_collections_are_truncated() {
    let options = ReflectOptions {
        max_collection_count: 2,
        ..ReflectOptions::default()
    };
    let value = Value::reflecting(&vec![10, 20, 30, 40, 50], &options);
    assert!(value.is_truncated);
    assert_eq!(
        descriptions(&value),
        vec!["10", "20", "(3 out of 5 elements omitted for brevity)"]
    );
    assert_eq!(value.description, "[10, 20, 30, 40, 50]");
}

#[test]
fn non_collections_ignore_count_limit() {
    let options = ReflectOptions {
        max_collection_count: 1,
        ..ReflectOptions::default()
    };
    let value = Value::reflecting(&(1, 2, 3), &options);
    assert!(!value.is_truncated);
    assert_eq!(value.child_count(), 3);
}

#[test]
fn depth_limit_stops_descent() {
    let options = ReflectOptions {
        max_child_depth: 1,
        ..ReflectOptions::default()
    };
    let value = Value::reflecting(&vec![vec![1], vec![]], &options);
    assert!(!value.is_truncated);

    let children = value.children.unwrap_or_default();
    assert_eq!(children.len(), 2);
    assert!(children[0].is_truncated);
    assert_eq!(children[0].children, None);
    assert!(!children[1].is_truncated);
}

#[test]
fn zero_depth_describes_only_the_subject() {
    let options = ReflectOptions {
        max_child_depth: 0,
        ..ReflectOptions::default()
    };
    let value = Value::reflecting(&vec![1], &options);
    assert_eq!(value.description, "[1]");
    assert_eq!(value.children, None);
    assert!(value.is_truncated);
}

#[test]
fn self_reference_terminates() {
    let node = shared("a");
    node.borrow_mut().next = Some(Rc::clone(&node));

    let value = Value::reflecting(&node, &ReflectOptions::unlimited());
    assert_eq!(value.description, "Node(a)");

    // node -> next (Option) -> some (the same Rc), which is not descended.
    let children = value.children.clone().unwrap_or_default();
    let next = &children[1];
    assert_eq!(next.label.as_deref(), Some("next"));
    let again = &next.children.clone().unwrap_or_default()[0];
    assert_eq!(again.description, "Node(a)");
    assert_eq!(again.children, None);

    node.borrow_mut().next = None;
}

#[test]
fn longer_cycle_terminates() {
    let a = shared("a");
    let b = shared("b");
    a.borrow_mut().next = Some(Rc::clone(&b));
    b.borrow_mut().next = Some(Rc::clone(&a));

    let value = Value::reflecting(&a, &ReflectOptions::unlimited());
    assert_eq!(value.description, "Node(a)");

    a.borrow_mut().next = None;
}

#[test]
fn shared_siblings_are_both_described() {
    let leaf = shared("leaf");
    let pair = (Rc::clone(&leaf), Rc::clone(&leaf));

    let value = Value::reflecting(&pair, &ReflectOptions::unlimited());
    let children = value.children.unwrap_or_default();
    assert_eq!(children.len(), 2);
    assert!(children[0].children.is_some());
    assert!(children[1].children.is_some());
}

#[test]
fn bool_values() {
    assert_eq!(Value::from_bool(true).as_bool(), Some(true));
    assert_eq!(Value::from_bool(false).description, "false");
    assert_eq!(
        Value::reflecting(&false, &ReflectOptions::default()).as_bool(),
        Some(false)
    );
    assert_eq!(Value::reflecting(&"true", &ReflectOptions::default()).as_bool(), None);
}

#[test]
fn type_values() {
    let value = Value::for_type(TypeInfo::of::<Vec<String>>());
    assert_eq!(value.description, "Vec<String>");
    assert_eq!(value.type_info, TypeInfo::of::<Vec<String>>());
}

#[test]
fn labels_can_be_attached() {
    let value = Value::from_bool(true).with_label("flag");
    assert_eq!(value.label.as_deref(), Some("flag"));
}
