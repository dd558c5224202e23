//! End-to-end import tests
//!
//! Full two-pass imports over synthetic documents: version gate, scan
//! metadata, per-run auxiliary data, bounded replay and finding
//! production.

use sarx_engine::{
    Finding, FindingsParser, ImportError, Priority, ScanParser,
};

#[cfg(test)]
mod end_to_end_tests {
    use super::*;

    fn minimal_doc() -> Vec<u8> {
        br#"{
            "version": "2.1.0",
            "runs": [{
                "tool": {"driver": {"name": "tester", "rules": [
                    {"id": "R1", "name": "ExampleRule"}
                ]}},
                "results": [
                    {"ruleId": "R1", "level": "error", "message": {"text": "boom"}}
                ]
            }]
        }"#
        .to_vec()
    }

    #[test]
    fn test_single_result_produces_single_finding() {
        let doc = minimal_doc();
        let mut findings: Vec<Finding> = Vec::new();
        let mut sink = |finding: Finding| findings.push(finding);
        let stats = FindingsParser::new()
            .parse(&doc, &mut sink)
            .expect("import succeeds");

        assert_eq!(stats.runs, 1);
        assert_eq!(stats.results, 1);
        assert_eq!(stats.findings, 1);
        assert_eq!(findings.len(), 1);

        let finding = &findings[0];
        assert_eq!(finding.category, "Example Rule");
        assert_eq!(finding.priority, Priority::High);
        assert_eq!(finding.message.as_deref(), Some("boom"));
        assert_eq!(finding.file_name, "Unknown");
        assert_eq!(finding.instance_id.len(), 64);
    }

    #[test]
    fn test_non_reportable_results_are_dropped() {
        let doc = br#"{
            "version": "2.1.0",
            "runs": [{
                "tool": {"driver": {"name": "tester", "rules": []}},
                "results": [
                    {"kind": "pass", "message": {"text": "fine"}},
                    {"kind": "informational", "message": {"text": "fyi"}},
                    {"message": {"text": "implicit fail"}}
                ]
            }]
        }"#
        .to_vec();
        let mut findings: Vec<Finding> = Vec::new();
        let mut sink = |finding: Finding| findings.push(finding);
        let stats = FindingsParser::new()
            .parse(&doc, &mut sink)
            .expect("import succeeds");

        assert_eq!(stats.results, 3);
        assert_eq!(stats.findings, 1);
        assert_eq!(findings[0].message.as_deref(), Some("implicit fail"));
        // Absent level with implicit fail kind resolves warning-equivalent.
        assert_eq!(findings[0].priority, Priority::Medium);
    }

    #[test]
    fn test_runs_resolve_against_their_own_rules() {
        let doc = br#"{
            "version": "2.1.0",
            "runs": [
                {
                    "tool": {"driver": {"name": "alpha", "rules": [{"id": "R", "name": "AlphaRule"}]}},
                    "results": [{"ruleId": "R", "level": "error", "message": {"text": "a"}}]
                },
                {
                    "tool": {"driver": {"name": "beta", "rules": [{"id": "R", "name": "BetaRule"}]}},
                    "results": [{"ruleId": "R", "level": "error", "message": {"text": "b"}}]
                }
            ]
        }"#
        .to_vec();
        let mut findings: Vec<Finding> = Vec::new();
        let mut sink = |finding: Finding| findings.push(finding);
        let stats = FindingsParser::new()
            .parse(&doc, &mut sink)
            .expect("import succeeds");

        assert_eq!(stats.runs, 2);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].category, "Alpha Rule");
        assert_eq!(findings[1].category, "Beta Rule");
    }

    #[test]
    fn test_results_after_rules_or_before_rules_both_resolve() {
        // The results array precedes the rule table here; replay must
        // still see the full auxiliary data collected by pass 1.
        let doc = br#"{
            "version": "2.1.0",
            "runs": [{
                "results": [{"ruleId": "R1", "level": "error", "message": {"text": "m"}}],
                "tool": {"driver": {"name": "tester", "rules": [{"id": "R1", "name": "LateRule"}]}}
            }]
        }"#
        .to_vec();
        let mut findings: Vec<Finding> = Vec::new();
        let mut sink = |finding: Finding| findings.push(finding);
        FindingsParser::new()
            .parse(&doc, &mut sink)
            .expect("import succeeds");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "Late Rule");
    }

    #[test]
    fn test_spilled_rule_table_resolves_identically() {
        let doc = minimal_doc();
        let mut spilled: Vec<Finding> = Vec::new();
        let mut spill_sink = |finding: Finding| spilled.push(finding);
        FindingsParser::new()
            .spill_threshold(0)
            .parse(&doc, &mut spill_sink)
            .expect("spilled import succeeds");
        drop(spill_sink);
        let mut in_memory: Vec<Finding> = Vec::new();
        let mut memory_sink = |finding: Finding| in_memory.push(finding);
        FindingsParser::new()
            .parse(&doc, &mut memory_sink)
            .expect("in-memory import succeeds");
        drop(memory_sink);

        assert_eq!(spilled.len(), 1);
        assert_eq!(spilled[0].category, in_memory[0].category);
        assert_eq!(spilled[0].instance_id, in_memory[0].instance_id);
    }

    #[test]
    fn test_huge_unsubscribed_subtrees_are_ignored() {
        // codeFlows and webRequest carry content the engine never
        // subscribes to; they must be skipped without affecting output.
        let doc = br#"{
            "version": "2.1.0",
            "runs": [{
                "tool": {"driver": {"name": "tester", "rules": [{"id": "R1", "name": "Rule"}]}},
                "results": [{
                    "ruleId": "R1",
                    "level": "error",
                    "message": {"text": "m"},
                    "codeFlows": [{"threadFlows": [{"locations": [{"x": [[[1,2,3]]]}]}]}],
                    "webRequest": {"body": {"text": "....[]{}...."}}
                }]
            }]
        }"#
        .to_vec();
        let mut findings: Vec<Finding> = Vec::new();
        let mut sink = |finding: Finding| findings.push(finding);
        let stats = FindingsParser::new()
            .parse(&doc, &mut sink)
            .expect("import succeeds");
        assert_eq!(stats.findings, 1);
    }
}

#[cfg(test)]
mod scan_tests {
    use super::*;

    #[test]
    fn test_scan_metadata_extraction() {
        let doc = br#"{
            "version": "2.1.0",
            "runs": [{
                "automationDetails": {"id": "nightly/42", "guid": "build-guid"},
                "invocations": [{"machine": "ci-worker", "endTimeUtc": "2026-02-08T16:08:25Z"}],
                "artifacts": [{"location": {"uri": "a.c"}}, {"location": {"uri": "b.c"}}],
                "tool": {"driver": {"name": "tester"}},
                "results": []
            }]
        }"#
        .to_vec();
        let scan = ScanParser::parse(&doc).expect("scan parses");
        assert_eq!(scan.engine_version, "2.1.0");
        assert_eq!(scan.host_name.as_deref(), Some("ci-worker"));
        assert_eq!(scan.build_id.as_deref(), Some("build-guid"));
        assert_eq!(scan.scan_label.as_deref(), Some("nightly/42"));
        assert_eq!(scan.num_files, 2);
        let date = scan.scan_date.expect("scan date parsed");
        assert_eq!(date.to_rfc3339(), "2026-02-08T16:08:25+00:00");
    }

    #[test]
    fn test_unsupported_version_is_fatal() {
        let doc = br#"{"version": "2.0.0", "runs": []}"#.to_vec();
        let err = ScanParser::parse(&doc).expect_err("version gate rejects");
        match err {
            ImportError::UnsupportedVersion(version) => assert_eq!(version, "2.0.0"),
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_version_is_fatal() {
        let doc = br#"{"runs": []}"#.to_vec();
        assert!(matches!(
            ScanParser::parse(&doc),
            Err(ImportError::UnsupportedVersion(_))
        ));
    }
}
