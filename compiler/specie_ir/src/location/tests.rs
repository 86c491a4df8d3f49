use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_location_display_is_one_based() {
    assert_eq!(Location::new(0, 0).to_string(), "line 1, col 1");
    assert_eq!(Location::new(4, 12).to_string(), "line 5, col 13");
}

#[test]
fn test_location_ordering() {
    assert!(Location::new(0, 9) < Location::new(1, 0));
    assert!(Location::new(2, 3) < Location::new(2, 4));
    assert_eq!(Location::new(1, 1), Location::new(1, 1));
}

#[test]
fn test_location_point() {
    let source = "var x = 1\nx + \"oops\n";
    let pointer = Location::new(1, 4).point(source, 2);
    assert_eq!(pointer, "  x + \"oops\n      ^");
}

#[test]
fn test_location_point_crlf() {
    let source = "first\r\nsecond";
    assert_eq!(Location::new(0, 2).point(source, 0), "first\n  ^");
}

#[test]
fn test_location_point_missing_line() {
    assert_eq!(Location::new(7, 0).point("one line", 0), "");
}
