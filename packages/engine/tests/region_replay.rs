//! Region capture and replay tests
//!
//! Pass 1 captures the byte span of a sub-tree without parsing it;
//! pass 2 re-opens the same bytes bounded to that span and parses it as
//! a standalone value. The round trip must yield exactly the entries an
//! in-place parse would have seen.

use sarx_engine::parser::{StartToken, StreamingParser};
use sarx_engine::stream::{JsonCursor, Region, RegionReader};
use sarx_engine::ImportError;

#[cfg(test)]
mod region_tests {
    use super::*;
    use std::io::Read;

    const DOC: &[u8] =
        br#"{"before": [0], "results": [{"id": 1}, {"id": 2, "nested": {"a": "]"}}, {"id": 3}], "after": true}"#;

    fn capture_results_region(doc: &[u8]) -> Region {
        struct Ctx {
            region: Option<Region>,
        }
        let mut ctx = Ctx { region: None };
        let parser = StreamingParser::<Ctx>::new().region_handler("/results", |ctx, region| {
            ctx.region = Some(region);
            Ok(())
        });
        parser.parse(&mut ctx, doc).expect("pass 1 succeeds");
        ctx.region.expect("results region captured")
    }

    #[test]
    fn test_region_is_value_aligned() {
        let region = capture_results_region(DOC);
        let slice = &DOC[region.start() as usize..region.end() as usize];
        assert!(slice.starts_with(b"["));
        assert!(slice.ends_with(b"]"));
        let parsed: serde_json::Value = serde_json::from_slice(slice).expect("span is one value");
        assert_eq!(parsed.as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_region_reader_bounds_the_stream() {
        let region = capture_results_region(DOC);
        let mut reader = RegionReader::new(DOC, Some(region));
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).expect("bounded read");
        assert_eq!(
            bytes,
            DOC[region.start() as usize..region.end() as usize].to_vec()
        );
    }

    #[test]
    fn test_replay_yields_same_entries_as_in_place_parse() {
        let region = capture_results_region(DOC);

        // In-place entries, via an ordinary full-document subscription.
        struct Ctx {
            entries: Vec<serde_json::Value>,
        }
        let mut in_place = Ctx {
            entries: Vec::new(),
        };
        StreamingParser::<Ctx>::new()
            .value_handler::<serde_json::Value, _>("/results/*", |ctx, v| {
                ctx.entries.push(v);
                Ok(())
            })
            .parse(&mut in_place, DOC)
            .expect("in-place parse");

        // Replayed entries, via the bounded second pass.
        let mut replayed = Ctx {
            entries: Vec::new(),
        };
        StreamingParser::<Ctx>::new()
            .expected_start(StartToken::Array)
            .entry_value_handler::<serde_json::Value, _>("/", |ctx, v| {
                ctx.entries.push(v);
                Ok(())
            })
            .parse_bounded(&mut replayed, DOC, Some(region))
            .expect("replay parse");

        assert_eq!(in_place.entries, replayed.entries);
        assert_eq!(replayed.entries.len(), 3);
    }

    #[test]
    fn test_replay_validates_start_token() {
        // A region deliberately offset into the object must fail the
        // array-start expectation structurally.
        let bogus = Region::new(0, DOC.len() as u64);
        struct Ctx;
        let parser = StreamingParser::<Ctx>::new().expected_start(StartToken::Array);
        let err = parser
            .parse_bounded(&mut Ctx, DOC, Some(bogus))
            .expect_err("object start where array expected");
        assert!(matches!(err, ImportError::Structural { .. }));
    }

    #[test]
    fn test_capture_region_requires_container() {
        let mut cursor = JsonCursor::new(b"42".as_slice());
        cursor.next_event().expect("valid");
        let err = cursor.capture_region().expect_err("scalar has no region");
        assert!(matches!(err, ImportError::Structural { .. }));
    }
}
