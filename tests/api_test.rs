// End-to-end checks of the public API against small documents.
use chrono::{Datelike, Duration, Timelike};
use sdl_core::{parse_literal, parse_str, parse_values, SdlError, Tag, Value};

#[test]
fn single_tag_with_string_value() {
    let root = parse_str("greeting \"hello\"").unwrap();
    assert_eq!(root.children().len(), 1);
    let tag = &root.children()[0];
    assert_eq!(tag.name(), "greeting");
    assert_eq!(tag.namespace(), "");
    assert_eq!(tag.values(), &[Value::String("hello".into())]);
}

#[test]
fn value_then_attribute() {
    let root = parse_str("size 5 name=\"joe\"").unwrap();
    let tag = &root.children()[0];
    assert_eq!(tag.values(), &[Value::Int32(5)]);
    assert_eq!(tag.attribute("name"), Some(&Value::String("joe".into())));
}

#[test]
fn parent_with_two_children() {
    let source = "parent {\n    son \"John\"\n    daughter \"Mary\"\n}\n";
    let root = parse_str(source).unwrap();
    let parent = &root.children()[0];
    assert_eq!(parent.name(), "parent");
    assert_eq!(parent.children().len(), 2);
    assert_eq!(parent.children()[1].name(), "daughter");
    assert_eq!(
        parent.children()[1].values(),
        &[Value::String("Mary".into())]
    );
}

#[test]
fn date_time_value_with_zone() {
    let root = parse_str("date 2005/12/31 12:30:00.120-JST").unwrap();
    match &root.children()[0].values()[0] {
        Value::DateTime(dt) => {
            assert_eq!(
                (dt.date.year(), dt.date.month(), dt.date.day()),
                (2005, 12, 31)
            );
            assert_eq!((dt.time.hour(), dt.time.minute(), dt.time.second()), (12, 30, 0));
            assert_eq!(dt.time.nanosecond() / 1_000_000, 120);
            assert_eq!(dt.timezone.as_deref(), Some("JST"));
        }
        other => panic!("expected a date-time, got {other:?}"),
    }
}

#[test]
fn negative_half_hour_span_round_trips() {
    let root = parse_str("span -00:30:00").unwrap();
    let tag = &root.children()[0];
    assert_eq!(tag.values(), &[Value::TimeSpan(Duration::minutes(-30))]);
    assert_eq!(tag.to_sdl(), "span -00:30:00");
}

#[test]
fn lone_string_is_an_anonymous_tag() {
    let root = parse_str("\"foo\"").unwrap();
    let tag = &root.children()[0];
    assert_eq!(tag.name(), "content");
    assert_eq!(tag.values(), &[Value::String("foo".into())]);
    assert_eq!(tag.to_sdl(), "\"foo\"");
}

#[test]
fn span_with_timezone_as_attribute_value_fails() {
    let err = parse_str("task start=5d:12:30:23.123-JST").unwrap_err();
    match err {
        SdlError::Parse(e) => {
            assert!(e.message.contains("timezone"), "{e}");
            assert_eq!(e.line, 1);
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}

#[test]
fn parse_values_returns_first_tag_values() {
    let values = parse_values("12:30:00 \"x\" 4").unwrap();
    assert_eq!(
        values,
        vec![
            Value::TimeSpan(Duration::hours(12) + Duration::minutes(30)),
            Value::String("x".into()),
            Value::Int32(4),
        ]
    );
}

#[test]
fn parse_literal_binary_decodes_bytes() {
    assert_eq!(
        parse_literal("[aGk=]").unwrap(),
        Value::Binary(vec![0x68, 0x69])
    );
}

#[test]
fn parse_literal_date_only() {
    match parse_literal("1/2/3").unwrap() {
        Value::Date(d) => assert_eq!((d.year(), d.month(), d.day()), (1, 2, 3)),
        other => panic!("expected a date, got {other:?}"),
    }
}

#[test]
fn parse_literal_char_escapes() {
    assert_eq!(parse_literal(r"'\n'").unwrap(), Value::Character('\n'));
    assert_eq!(parse_literal(r"'\t'").unwrap(), Value::Character('\t'));
    assert_eq!(parse_literal(r"'\\'").unwrap(), Value::Character('\\'));
    assert_eq!(parse_literal(r"'\''").unwrap(), Value::Character('\''));
}

#[test]
fn parse_literal_decimal_fraction() {
    assert_eq!(parse_literal("-.5").unwrap(), Value::Float64(-0.5));
    assert_eq!(
        parse_literal("-.5BD").unwrap(),
        Value::Decimal("-0.5".parse().unwrap())
    );
}

#[test]
fn built_tags_serialize_like_parsed_tags() {
    let mut tag = Tag::new("size").unwrap();
    tag.push_value(5i32);
    tag.set_attribute("name", "joe").unwrap();
    let parsed = parse_str("size 5 name=\"joe\"").unwrap();
    assert_eq!(&parsed.children()[0], &tag);
}

#[test]
fn document_reader_source() {
    // parse_document accepts any BufRead source, not only strings.
    let bytes: &[u8] = b"a 1\r\nb 2\r\n";
    let root = sdl_core::parse_document(bytes).unwrap();
    assert_eq!(root.children().len(), 2);
}
