//! JSON cursor tests
//!
//! Token sequencing, offset tracking, raw capture and structural
//! skipping over the byte window.

use sarx_engine::stream::{Event, JsonCursor};

#[cfg(test)]
mod cursor_tests {
    use super::*;

    fn events(input: &str) -> Vec<Event> {
        let mut cursor = JsonCursor::new(input.as_bytes());
        let mut out = Vec::new();
        while let Some(ev) = cursor.next_event().expect("valid JSON") {
            out.push(ev);
        }
        out
    }

    #[test]
    fn test_event_sequence() {
        let evs = events(r#"{"a": 1, "b": [true, null], "c": "x"}"#);
        assert_eq!(
            evs,
            vec![
                Event::ObjectStart,
                Event::Key("a".into()),
                Event::Number,
                Event::Key("b".into()),
                Event::ArrayStart,
                Event::Bool(true),
                Event::Null,
                Event::ArrayEnd,
                Event::Key("c".into()),
                Event::String,
                Event::ObjectEnd,
            ]
        );
    }

    #[test]
    fn test_escaped_keys_decode() {
        let evs = events(r#"{"a\"b\\cA": 1}"#);
        assert_eq!(evs[1], Event::Key("a\"b\\cA".into()));
    }

    #[test]
    fn test_read_value_string_with_escapes() {
        let mut cursor = JsonCursor::new(r#""line\nbreak é""#.as_bytes());
        cursor.next_event().expect("valid").expect("value");
        let value: String = cursor.read_value().expect("string decodes");
        assert_eq!(value, "line\nbreak \u{e9}");
    }

    #[test]
    fn test_capture_value_returns_raw_bytes() {
        let doc = br#"{"keep": {"x": [1, "a]b"], "y": null}, "z": 2}"#;
        let mut cursor = JsonCursor::new(doc.as_slice());
        cursor.next_event().expect("valid"); // {
        cursor.next_event().expect("valid"); // keep
        cursor.next_event().expect("valid"); // value start
        let raw = cursor.capture_value().expect("capture");
        assert_eq!(raw, br#"{"x": [1, "a]b"], "y": null}"#.to_vec());
        // Cursor continues cleanly after the captured sub-tree.
        assert_eq!(
            cursor.next_event().expect("valid"),
            Some(Event::Key("z".into()))
        );
    }

    #[test]
    fn test_skip_matches_consume_position() {
        let doc = br#"{"x": {"deep": [1, 2, {"s": "t}]"}]}, "y": 7}"#;
        let mut skipping = JsonCursor::new(doc.as_slice());
        let mut consuming = JsonCursor::new(doc.as_slice());
        for cursor in [&mut skipping, &mut consuming] {
            cursor.next_event().expect("valid"); // {
            cursor.next_event().expect("valid"); // x
            cursor.next_event().expect("valid"); // value start
        }
        skipping.skip_value().expect("skip");
        consuming.capture_value().expect("consume");
        assert_eq!(skipping.position(), consuming.position());
        assert_eq!(
            skipping.next_event().expect("valid"),
            Some(Event::Key("y".into()))
        );
    }

    #[test]
    fn test_count_array_entries() {
        let mut cursor = JsonCursor::new(br#"[1, {"a": [2, 3]}, "x", [4], null]"#.as_slice());
        cursor.next_event().expect("valid");
        assert_eq!(cursor.count_array_entries().expect("count"), 5);
    }

    #[test]
    fn test_number_capture() {
        let mut cursor = JsonCursor::new(b"-12.5e3".as_slice());
        cursor.next_event().expect("valid");
        let value: f64 = cursor.read_value().expect("number");
        assert_eq!(value, -12.5e3);
    }

    #[test]
    fn test_unexpected_end_is_structural() {
        let mut cursor = JsonCursor::new(br#"{"a": "#.as_slice());
        cursor.next_event().expect("valid");
        cursor.next_event().expect("valid");
        let err = cursor.next_event().expect_err("truncated input");
        assert!(err.to_string().contains("structural parse error"));
    }

    #[test]
    fn test_empty_input_yields_no_events() {
        let mut cursor = JsonCursor::new(b"".as_slice());
        assert_eq!(cursor.next_event().expect("eof"), None);
    }
}
