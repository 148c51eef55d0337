use super::*;

enum Nested {
    Leaf,
    Wrap(Box<Nested>),
}

fn nest(depth: u32) -> Nested {
    let mut value = Nested::Leaf;
    for _ in 0..depth {
        value = Nested::Wrap(Box::new(value));
    }
    value
}

fn describe(value: &Nested) -> usize {
    ensure_sufficient_stack(|| match value {
        Nested::Leaf => 0,
        Nested::Wrap(inner) => describe(inner) + 1,
    })
}

/// Unwind iteratively so the drop of a huge chain cannot overflow.
fn dismantle(mut value: Nested) {
    while let Nested::Wrap(inner) = value {
        value = *inner;
    }
}

#[test]
fn shallow_structure() {
    let value = nest(10);
    assert_eq!(describe(&value), 10);
    dismantle(value);
}

#[test]
fn deep_structure_grows_the_stack() {
    let value = nest(200_000);
    assert_eq!(describe(&value), 200_000);
    dismantle(value);
}

#[test]
fn passes_result_through() {
    let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("nope"));
    assert_eq!(result, Err("nope"));
}
