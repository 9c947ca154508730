// Integration tests for sdl-core using test fixtures
use sdl_core::parse_str;
use std::fs;
use std::path::PathBuf;

fn read_test_file(subdir: &str, filename: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join(subdir)
        .join(filename);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {path:?}"))
}

/// Parses a fixture, serializes it back, reparses, and checks both trees
/// and both serializations agree.
fn assert_round_trip(filename: &str) {
    let source = read_test_file("ok", filename);
    let root = parse_str(&source)
        .unwrap_or_else(|e| panic!("{filename} should parse successfully: {e}"));
    let serialized = root.children_to_sdl();
    let reparsed = parse_str(&serialized)
        .unwrap_or_else(|e| panic!("canonical form of {filename} should reparse: {e}\n{serialized}"));
    assert_eq!(root, reparsed, "round trip changed the tree for {filename}");
    assert_eq!(
        serialized,
        reparsed.children_to_sdl(),
        "round trip changed the canonical form for {filename}"
    );
}

// Valid SDL files: parse, round-trip, and serialize to JSON.
mod ok_tests {
    use super::*;

    #[test]
    fn test_basic_types() {
        assert_round_trip("basic_types.sdl");
    }

    #[test]
    fn test_structures() {
        assert_round_trip("structures.sdl");
    }

    #[test]
    fn test_temporal() {
        assert_round_trip("temporal.sdl");
    }

    #[test]
    fn test_strings() {
        assert_round_trip("strings.sdl");
    }

    #[test]
    fn test_comments() {
        assert_round_trip("comments.sdl");
    }

    #[test]
    fn test_edge_cases() {
        assert_round_trip("edge_cases.sdl");
    }

    #[test]
    fn test_structures_shape() {
        let source = read_test_file("ok", "structures.sdl");
        let root = parse_str(&source).unwrap();
        let folder = &root.children()[0];
        assert_eq!(folder.namespace(), "files");
        assert_eq!(folder.name(), "folder");
        assert_eq!(folder.children().len(), 3);
        assert_eq!(folder.children()[2].children().len(), 1);

        let anonymous = &root.children()[1];
        assert!(anonymous.is_anonymous());

        let matrix = &root.children()[2];
        assert_eq!(matrix.children().len(), 2);
        assert!(matrix.children().iter().all(|row| row.is_anonymous()));
    }

    #[test]
    fn test_comments_leave_only_tags() {
        let source = read_test_file("ok", "comments.sdl");
        let root = parse_str(&source).unwrap();
        let names: Vec<&str> = root.children().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["tag1", "tag2", "tag3", "tag4"]);
    }

    #[test]
    fn test_fixtures_serialize_to_json() {
        for file in ["basic_types.sdl", "structures.sdl", "temporal.sdl"] {
            let source = read_test_file("ok", file);
            let root = parse_str(&source).unwrap();
            assert!(root.to_json().is_ok(), "{file} should serialize to JSON");
            assert!(root.to_yaml().is_ok(), "{file} should serialize to YAML");
        }
    }
}

// Invalid SDL files: every one must fail with a parse error.
mod bad_tests {
    use super::*;
    use sdl_core::SdlError;

    fn assert_parse_error(filename: &str, expected_fragment: &str) {
        let source = read_test_file("bad", filename);
        match parse_str(&source) {
            Ok(root) => panic!("{filename} should fail to parse, got {root:?}"),
            Err(SdlError::Parse(e)) => assert!(
                e.message.contains(expected_fragment),
                "{filename}: expected message containing {expected_fragment:?}, got {:?}",
                e.message
            ),
            Err(other) => panic!("{filename}: unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_block() {
        assert_parse_error("unclosed_block.sdl", "no closing brace");
    }

    #[test]
    fn test_stray_close() {
        assert_parse_error("stray_close.sdl", "no opening block");
    }

    #[test]
    fn test_span_with_timezone() {
        assert_parse_error("span_with_timezone.sdl", "timezone");
    }

    #[test]
    fn test_datetime_with_days() {
        assert_parse_error("datetime_with_days.sdl", "day component");
    }

    #[test]
    fn test_bad_escape() {
        assert_parse_error("bad_escape.sdl", "illegal escape");
    }

    #[test]
    fn test_unterminated_string() {
        assert_parse_error("unterminated_string.sdl", "not terminated");
    }

    #[test]
    fn test_bad_number() {
        assert_parse_error("bad_number.sdl", "decimal point");
    }

    #[test]
    fn test_unterminated_comment() {
        assert_parse_error("unterminated_comment.sdl", "block comment");
    }

    #[test]
    fn test_attribute_without_value() {
        assert_parse_error("attribute_without_value.sdl", "end of line");
    }
}
