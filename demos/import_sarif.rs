//! Import a SARIF report and print its findings.
//!
//! ```sh
//! cargo run --example import_sarif -- report.sarif
//! ```

use sarx::{Finding, Sarx};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: import_sarif <report.sarif>")?;
    let document = std::fs::read(&path)?;

    let importer = Sarx::importer().engine_type("SARIF");

    let scan = importer.parse_scan(&document)?;
    println!(
        "document version {}, {} files scanned",
        scan.engine_version, scan.num_files
    );

    let mut sink = |finding: Finding| {
        println!(
            "[{}] {} @ {}:{}: {}",
            finding.priority,
            finding.category,
            finding.file_name,
            finding.line_number.unwrap_or(0),
            finding.message.unwrap_or_default()
        );
    };
    let stats = importer.import(&document, &mut sink)?;
    println!(
        "{} findings from {} results in {} runs",
        stats.findings, stats.results, stats.runs
    );
    Ok(())
}
