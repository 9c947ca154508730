// Error reporting: every failure carries a message and a 1-based position.
use sdl_core::{parse_str, ParseError, SdlError};

fn parse_error(source: &str) -> ParseError {
    match parse_str(source) {
        Ok(root) => panic!("expected an error for {source:?}, got {root:?}"),
        Err(SdlError::Parse(e)) => e,
        Err(other) => panic!("unexpected error kind for {source:?}: {other:?}"),
    }
}

#[test]
fn unexpected_character_position() {
    let e = parse_error("first\nsecond %\n");
    assert_eq!((e.line, e.column), (2, 8));
}

#[test]
fn unterminated_string_names_the_line() {
    let e = parse_error("a 1\nb \"oops\n");
    assert!(e.message.contains("not terminated"), "{e}");
    assert_eq!(e.line, 2);
}

#[test]
fn string_continuation_hits_end_of_input() {
    let e = parse_error("a \"one \\");
    assert!(e.message.contains("not terminated"), "{e}");
}

#[test]
fn illegal_escape_in_string() {
    let e = parse_error(r#"a "bad \z escape""#);
    assert!(e.message.contains("illegal escape"), "{e}");
}

#[test]
fn illegal_escape_in_char() {
    let e = parse_error(r"a '\z'");
    assert!(e.message.contains("illegal escape"), "{e}");
}

#[test]
fn two_decimal_points() {
    let e = parse_error("v 1.2.3");
    assert!(e.message.contains("more than one decimal point"), "{e}");
    assert_eq!((e.line, e.column), (1, 3));
}

#[test]
fn trailing_decimal_point() {
    let e = parse_error("v 5.");
    assert!(e.message.contains("ends with a decimal point"), "{e}");
}

#[test]
fn colon_without_a_tag_name() {
    let e = parse_error("tag : 5");
    assert!(e.message.contains("a tag name after ':'"), "{e}");
}

#[test]
fn equals_without_attribute_name() {
    let e = parse_error("tag = 5");
    assert!(e.message.starts_with("Expecting a value"), "{e}");
}

#[test]
fn missing_attribute_value_at_line_end() {
    let e = parse_error("tag key=");
    assert!(e.message.contains("end of line"), "{e}");
    assert_eq!(e.line, 1);
}

#[test]
fn stray_close_brace_position() {
    let e = parse_error("a 1\n   }\n");
    assert_eq!(e.message, "no opening block for close block");
    assert_eq!((e.line, e.column), (2, 4));
}

#[test]
fn missing_close_brace_points_at_the_open_line() {
    let e = parse_error("outer {\n  inner {\n    leaf 1\n  }\n");
    assert!(e.message.contains("no closing brace"), "{e}");
    assert_eq!(e.line, 1);
}

#[test]
fn timezone_on_time_span() {
    let e = parse_error("span 12:30:00-JST");
    assert_eq!(e.message, "TimeSpan cannot have a timezone");
}

#[test]
fn day_component_in_date_time() {
    let e = parse_error("when 2005/12/31 1d:02:03:04");
    assert!(e.message.contains("day component"), "{e}");
}

#[test]
fn zero_day_component_in_date_time_is_not_an_error() {
    let root = parse_str("when 2005/12/31 0d:12:30:00").unwrap();
    assert!(matches!(
        root.children()[0].values()[0],
        sdl_core::Value::DateTime(_)
    ));
}

#[test]
fn malformed_base64() {
    let e = parse_error("bin [!!]");
    assert!(e.message.contains("base64"), "{e}");
}

#[test]
fn error_display_includes_position() {
    let e = parse_error("v 1.2.3");
    let text = e.to_string();
    assert!(text.contains("line 1"), "{text}");
    assert!(text.contains("column 3"), "{text}");
}
