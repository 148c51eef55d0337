use super::*;

#[test]
fn display_is_file_line_column() {
    let location = SourceLocation::new("tests/math.rs", 12, 5);
    assert_eq!(location.to_string(), "tests/math.rs:12:5");
}

#[test]
fn file_name_strips_directories() {
    assert_eq!(SourceLocation::new("a/b/c.rs", 1, 1).file_name(), "c.rs");
    assert_eq!(SourceLocation::new("a\\b\\d.rs", 1, 1).file_name(), "d.rs");
    assert_eq!(SourceLocation::new("lib.rs", 1, 1).file_name(), "lib.rs");
}

#[test]
fn caller_points_at_this_file() {
    let location = SourceLocation::caller();
    assert!(location.file_path.ends_with("tests.rs"));
    assert!(location.line > 0);
}
