//! Path-addressed parser tests
//!
//! Handler dispatch by exact and wildcard path, synthetic prefix
//! traversal, explicit-over-wildcard precedence, and skip behavior for
//! unregistered sub-trees.

use sarx_engine::parser::{StartToken, StreamingParser};
use sarx_engine::ImportError;

#[cfg(test)]
mod streaming_tests {
    use super::*;

    #[derive(Default)]
    struct Collected {
        values: Vec<(String, serde_json::Value)>,
    }

    #[test]
    fn test_registered_leaf_invoked_exactly_once() {
        let doc = br#"{"a": {"b": {"c": 42}, "sibling": {"huge": [1,2,3,4]}}, "other": true}"#;
        let mut collected = Collected::default();
        let parser = StreamingParser::<Collected>::new().value_handler::<serde_json::Value, _>(
            "/a/b/c",
            |ctx, v| {
                ctx.values.push(("/a/b/c".into(), v));
                Ok(())
            },
        );
        parser
            .parse(&mut collected, doc.as_slice())
            .expect("parse succeeds");
        assert_eq!(
            collected.values,
            vec![("/a/b/c".to_string(), serde_json::json!(42))]
        );
    }

    #[test]
    fn test_unregistered_siblings_are_skipped_silently() {
        // Handlers only at /a/b; deeply nested siblings must be skipped
        // without breaking traversal to later registered paths.
        let doc = br#"{"first": {"deep": {"deeper": [[[1]]]}}, "a": {"b": 1}, "tail": "x"}"#;
        let mut collected = Collected::default();
        let parser = StreamingParser::<Collected>::new()
            .value_handler::<serde_json::Value, _>("/a/b", |ctx, v| {
                ctx.values.push(("/a/b".into(), v));
                Ok(())
            })
            .value_handler::<serde_json::Value, _>("/tail", |ctx, v| {
                ctx.values.push(("/tail".into(), v));
                Ok(())
            });
        parser
            .parse(&mut collected, doc.as_slice())
            .expect("parse succeeds");
        assert_eq!(
            collected.values,
            vec![
                ("/a/b".to_string(), serde_json::json!(1)),
                ("/tail".to_string(), serde_json::json!("x")),
            ]
        );
    }

    #[test]
    fn test_wildcard_matches_object_keys_and_array_indexes() {
        let doc = br#"{"map": {"k1": 1, "k2": 2}, "list": [10, 20, 30]}"#;
        let mut collected = Collected::default();
        let parser = StreamingParser::<Collected>::new()
            .named_value_handler::<i64, _>("/map/*", |ctx, name, v| {
                ctx.values.push((name.to_string(), serde_json::json!(v)));
                Ok(())
            })
            .value_handler::<i64, _>("/list/*", |ctx, v| {
                ctx.values.push(("entry".into(), serde_json::json!(v)));
                Ok(())
            });
        parser
            .parse(&mut collected, doc.as_slice())
            .expect("parse succeeds");
        assert_eq!(collected.values.len(), 5);
        assert!(collected
            .values
            .contains(&("k1".to_string(), serde_json::json!(1))));
        assert!(collected
            .values
            .contains(&("entry".to_string(), serde_json::json!(30))));
    }

    #[test]
    fn test_explicit_registration_beats_wildcard() {
        let doc = br#"{"a": {"b": 1, "c": 2}}"#;
        let mut collected = Collected::default();
        let parser = StreamingParser::<Collected>::new()
            .value_handler::<i64, _>("/a/*", |ctx, v| {
                ctx.values.push(("wildcard".into(), serde_json::json!(v)));
                Ok(())
            })
            .value_handler::<i64, _>("/a/b", |ctx, v| {
                ctx.values.push(("literal".into(), serde_json::json!(v)));
                Ok(())
            });
        parser
            .parse(&mut collected, doc.as_slice())
            .expect("parse succeeds");
        assert_eq!(
            collected.values,
            vec![
                ("literal".to_string(), serde_json::json!(1)),
                ("wildcard".to_string(), serde_json::json!(2)),
            ]
        );
    }

    #[test]
    fn test_explicit_registration_survives_later_leaf_registration() {
        // Registering /a/b/c after /a/b must not replace the explicit
        // /a/b handler with a synthetic pass-through.
        let parser = StreamingParser::<Collected>::new()
            .value_handler::<serde_json::Value, _>("/a/b", |_, _| Ok(()))
            .value_handler::<serde_json::Value, _>("/a/b/c", |_, _| Ok(()));
        assert!(!parser.is_synthetic("/a/b"));
        assert!(parser.is_synthetic("/a"));
        assert!(parser.is_synthetic("/"));
    }

    #[test]
    fn test_wrong_start_token_is_structural_error() {
        let mut collected = Collected::default();
        let parser = StreamingParser::<Collected>::new();
        let err = parser
            .parse(&mut collected, b"[1, 2]".as_slice())
            .expect_err("array where object expected");
        match err {
            ImportError::Structural { offset, .. } => assert_eq!(offset, 0),
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_expected_start_override_accepts_array() {
        let mut collected = Collected::default();
        let parser = StreamingParser::<Collected>::new()
            .expected_start(StartToken::Array)
            .entry_value_handler::<i64, _>("/", |ctx, v| {
                ctx.values.push(("entry".into(), serde_json::json!(v)));
                Ok(())
            });
        parser
            .parse(&mut collected, b"[1, 2, 3]".as_slice())
            .expect("parse succeeds");
        assert_eq!(collected.values.len(), 3);
    }

    #[test]
    fn test_handler_recursion_through_parse_helpers() {
        // A raw handler delegating back into the engine's own object
        // traversal keeps dispatching below its path.
        let doc = br#"{"outer": {"inner": {"x": 5}}}"#;
        let mut collected = Collected::default();
        let parser = StreamingParser::<Collected>::new()
            .handler("/outer", |parser, ctx, cursor| {
                parser.parse_object_or_array_children(ctx, cursor, "/outer")
            })
            .value_handler::<i64, _>("/outer/inner/x", |ctx, v| {
                ctx.values.push(("x".into(), serde_json::json!(v)));
                Ok(())
            });
        parser
            .parse(&mut collected, doc.as_slice())
            .expect("parse succeeds");
        assert_eq!(
            collected.values,
            vec![("x".to_string(), serde_json::json!(5))]
        );
    }
}
