use super::*;
use pretty_assertions::assert_eq;

#[test]
fn removed_element_reports_original_offset() {
    let difference = Difference::between(&vec![1, 2, 3], &vec![1, 3]);
    let Some(difference) = difference else {
        panic!("expected a difference");
    };
    assert_eq!(
        difference.changes(),
        &[Change::Remove {
            offset: 1,
            element: "2".to_owned()
        }]
    );
    assert_eq!(difference.to_string(), "removed [2]");
}

#[test]
fn insertions_and_removals_are_both_listed() {
    let difference = Difference::between(&[1, 2, 3], &[1, 9, 3, 4]);
    let Some(difference) = difference else {
        panic!("expected a difference");
    };
    assert_eq!(difference.insertions().collect::<Vec<_>>(), vec!["9", "4"]);
    assert_eq!(difference.removals().collect::<Vec<_>>(), vec!["2"]);
    assert_eq!(difference.to_string(), "inserted [9, 4], removed [2]");
}

#[test]
fn string_elements_keep_quotes() {
    let difference = Difference::between(&vec!["a", "b"], &vec!["a"]);
    assert_eq!(
        difference.map(|difference| difference.to_string()),
        Some("removed [\"b\"]".to_owned())
    );
}

#[test]
fn single_line_strings_are_not_diffed() {
    assert_eq!(Difference::between(&"hello", &"help"), None);
    assert_eq!(
        Difference::between(&String::from("a"), &String::from("b")),
        None
    );
}

#[test]
fn multi_line_strings_diff_by_line() {
    let difference = Difference::between(&"one\ntwo\nthree", &"one\n2\nthree");
    let Some(difference) = difference else {
        panic!("expected a difference");
    };
    assert_eq!(
        difference.changes(),
        &[
            Change::Remove {
                offset: 1,
                element: "\"two\"".to_owned()
            },
            Change::Insert {
                offset: 1,
                element: "\"2\"".to_owned()
            },
        ]
    );
}

#[test]
fn removed_empty_line_is_visible() {
    let difference = Difference::between(&"alpha\n\nbeta", &"alpha\nbeta");
    let Some(difference) = difference else {
        panic!("expected a difference");
    };
    assert_eq!(
        difference.changes(),
        &[Change::Remove {
            offset: 1,
            element: "\"\"".to_owned()
        }]
    );
    assert_eq!(difference.to_string(), "removed [\"\"]");
}

#[test]
fn whitespace_changes_keep_their_spaces() {
    let difference = Difference::between(&"a\n b\nc", &"a\nb \nc");
    assert_eq!(
        difference.map(|difference| difference.to_string()),
        Some("inserted [\"b \"], removed [\" b\"]".to_owned())
    );
}

#[test]
fn line_ending_noise_yields_no_difference() {
    assert_eq!(Difference::between(&"a\r\nb\r\n", &"a\nb"), None);
}

#[test]
fn ranges_are_not_diffed() {
    assert_eq!(Difference::between(&(0..3), &(0..4)), None);
    assert_eq!(Difference::between(&(0..3), &vec![0, 1]), None);
}

#[test]
fn incomparable_elements_are_not_diffed() {
    let lhs: Vec<Option<Vec<u8>>> = vec![Some(vec![1])];
    let rhs: Vec<Option<Vec<u8>>> = vec![None];
    assert!(Difference::between(&lhs, &rhs).is_some());

    let lhs = vec![std::collections::BTreeSet::from([1])];
    let rhs = vec![std::collections::BTreeSet::from([2])];
    assert_eq!(Difference::between(&lhs, &rhs), None);
}

#[test]
fn scalars_are_not_diffed() {
    assert_eq!(Difference::between(&1, &2), None);
}

#[test]
fn equal_sequences_have_no_difference() {
    assert_eq!(Difference::between(&vec![1, 2], &[1, 2]), None);
}

#[test]
fn long_sequences_with_one_change() {
    let lhs: Vec<i64> = (0..20_000).collect();
    let mut rhs = lhs.clone();
    rhs[10_000] = -1;

    let Some(difference) = Difference::between(&lhs, &rhs) else {
        panic!("expected a difference");
    };
    assert_eq!(
        difference.changes(),
        &[
            Change::Remove {
                offset: 10_000,
                element: "10000".to_owned()
            },
            Change::Insert {
                offset: 10_000,
                element: "-1".to_owned()
            },
        ]
    );
}

#[test]
fn long_sequences_with_a_shared_tail() {
    let lhs: Vec<i64> = (0..5_000).collect();
    let rhs: Vec<i64> = (2..5_000).collect();
    assert_eq!(
        Difference::between(&lhs, &rhs).map(|difference| difference.to_string()),
        Some("removed [0, 1]".to_owned())
    );
}

#[test]
fn unrelated_long_sequences_are_not_diffed() {
    let lhs: Vec<i64> = (0..3_000).collect();
    let rhs: Vec<i64> = (3_000..6_000).collect();
    assert_eq!(Difference::between(&lhs, &rhs), None);
}

#[test]
fn script_is_shortest() {
    let difference = Difference::between(&[1, 2, 3, 4, 5], &[2, 3, 9, 4]);
    let Some(difference) = difference else {
        panic!("expected a difference");
    };
    assert_eq!(difference.removals().collect::<Vec<_>>(), vec!["1", "5"]);
    assert_eq!(difference.insertions().collect::<Vec<_>>(), vec!["9"]);
}
