//! Integration tests for the `report`, `show`, and `init` commands.
//!
//! Every test works in its own temporary directory and passes an explicit
//! configuration file so results never depend on the current directory.

use camino::{Utf8Path, Utf8PathBuf};
use parsebench::Host;
use std::fs;

const SUFFIX: &str = "_quick_match_metric_result.json";

const CSV_HEADER: &str = "Parser,Text Edit Dist,Text BLEU,Text METEOR,Table TEDS,Table TEDS-Struct,Table Edit Dist,Reading Order Edit Dist";

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }
}

struct Workspace {
    _dir: tempfile::TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        fs::create_dir_all(root.join("result")).unwrap();

        let mut host = TestHost::new();
        parsebench::run(&mut host, ["parsebench", "init", root.join("parsebench.toml").as_str()]).unwrap();

        Self { _dir: dir, root }
    }

    fn result_dir(&self) -> Utf8PathBuf {
        self.root.join("result")
    }

    fn csv(&self) -> Utf8PathBuf {
        self.root.join("out/benchmark_report.csv")
    }

    fn chart(&self) -> Utf8PathBuf {
        self.root.join("out/benchmark_chart.png")
    }

    fn add_metrics(&self, backend: &str, contents: &str) {
        fs::write(self.result_dir().join(format!("{backend}{SUFFIX}")), contents).unwrap();
    }

    fn report(&self, extra: &[&str]) -> (TestHost, parsebench::Result<()>) {
        self.report_to(&self.csv(), &self.chart(), extra)
    }

    /// Run a report writing its CSV and chart to the given paths.
    fn report_to(&self, csv: &Utf8Path, chart: &Utf8Path, extra: &[&str]) -> (TestHost, parsebench::Result<()>) {
        let config = self.root.join("parsebench.toml");
        let result_dir = self.result_dir();
        let mut args = vec![
            "parsebench",
            "--config",
            config.as_str(),
            "--result-dir",
            result_dir.as_str(),
            "--csv",
            csv.as_str(),
            "--chart",
            chart.as_str(),
            "--color",
            "never",
        ];
        args.extend_from_slice(extra);

        let mut host = TestHost::new();
        let result = parsebench::run(&mut host, args);
        (host, result)
    }
}

fn read(path: &Utf8Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[cfg(feature = "chart")]
const FIXTURE_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSans.ttf");

/// Console output without the line reporting on the chart channel.
fn without_chart_notice(output: &str) -> String {
    output
        .lines()
        .filter(|line| !line.starts_with("Saved chart to") && !line.starts_with("Skipping chart generation"))
        .collect::<Vec<_>>()
        .join("\n")
}

const DOCLING: &str = r#"{
    "text_block": { "all": { "Edit_dist": { "ALL_page_avg": 0.12 } } },
    "table": { "all": { "TEDS": { "all": 0.85 } } }
}"#;

const MARKER: &str = r#"{
    "text_block": { "all": {
        "Edit_dist": { "ALL_page_avg": 0.3 },
        "BLEU": { "all": 0.6 },
        "METEOR": { "all": 0.7 }
    }},
    "table": { "all": {
        "TEDS": { "all": 0.5 },
        "TEDS_structure_only": { "all": 0.55 },
        "Edit_dist": { "ALL_page_avg": 0.4 }
    }},
    "reading_order": { "all": { "Edit_dist": { "ALL_page_avg": 0.2 } } }
}"#;

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_single_backend_with_partial_metrics() {
    let ws = Workspace::new();
    ws.add_metrics("docling", DOCLING);

    let (host, result) = ws.report(&["--no-chart"]);
    assert!(result.is_ok(), "report should succeed: {result:?}");

    let output = host.output_str();
    assert!(output.contains("OMNIDOCBENCH EVALUATION REPORT"), "got: {output}");
    assert!(output.contains("docling"));
    assert!(output.contains("0.12"));
    assert!(output.contains("0.85"));
    assert!(output.contains("N/A"));
    assert!(output.contains(&format!("Saved to {}", ws.csv())));
    assert!(output.contains("Skipping chart generation"));

    let csv = read(&ws.csv());
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines, [CSV_HEADER, "docling,0.12,N/A,N/A,0.85,N/A,N/A,N/A"]);
    assert!(!ws.chart().exists());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_malformed_file_is_skipped() {
    let ws = Workspace::new();
    ws.add_metrics("broken", "{ this is not json");
    ws.add_metrics("marker", MARKER);

    let (host, result) = ws.report(&["--no-chart"]);
    assert!(result.is_ok(), "report should succeed: {result:?}");

    let output = host.output_str();
    assert!(output.contains("Skipping metrics for 'broken'"), "got: {output}");

    let csv = read(&ws.csv());
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines, [CSV_HEADER, "marker,0.3,0.6,0.7,0.5,0.55,0.4,0.2"]);
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_empty_result_dir_writes_nothing() {
    let ws = Workspace::new();

    let (host, result) = ws.report(&[]);
    assert!(result.is_ok(), "empty directory is not an error: {result:?}");

    let output = host.output_str();
    assert!(output.contains("No result data found"), "got: {output}");
    assert!(!output.contains("OMNIDOCBENCH EVALUATION REPORT"));
    assert!(!ws.csv().exists());
    assert!(!ws.chart().exists());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_missing_result_dir_writes_nothing() {
    let ws = Workspace::new();
    fs::remove_dir(ws.result_dir()).unwrap();

    let (host, result) = ws.report(&[]);
    assert!(result.is_ok(), "missing directory is not an error: {result:?}");
    assert!(host.output_str().contains("No result data found"));
    assert!(!ws.csv().exists());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_all_files_undecodable_writes_nothing() {
    let ws = Workspace::new();
    ws.add_metrics("broken", "[1, 2, 3]");

    let (host, result) = ws.report(&[]);
    assert!(result.is_ok(), "{result:?}");

    let output = host.output_str();
    assert!(output.contains("Skipping metrics for 'broken'"), "got: {output}");
    assert!(output.contains("No result data found"));
    assert!(!ws.csv().exists());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_unavailable_chart_still_writes_csv() {
    let ws = Workspace::new();
    ws.add_metrics("docling", DOCLING);
    let font = ws.root.join("missing.ttf");

    let (host, result) = ws.report(&["--chart-font", font.as_str()]);
    assert!(result.is_ok(), "{result:?}");

    let output = host.output_str();
    assert!(output.contains("Skipping chart generation"), "got: {output}");
    assert!(ws.csv().exists());
    assert!(!ws.chart().exists());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_report_is_deterministic() {
    let ws = Workspace::new();
    ws.add_metrics("marker", MARKER);
    ws.add_metrics("docling", DOCLING);

    let (first_host, first) = ws.report(&["--no-chart"]);
    first.unwrap();
    let first_csv = read(&ws.csv());

    let (second_host, second) = ws.report(&["--no-chart"]);
    second.unwrap();
    let second_csv = read(&ws.csv());

    assert_eq!(first_host.output_str(), second_host.output_str());
    assert_eq!(first_csv, second_csv);

    let backends: Vec<_> = first_csv.lines().skip(1).filter_map(|line| line.split(',').next()).collect();
    assert_eq!(backends, ["docling", "marker"]);
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_explicit_report_subcommand() {
    let ws = Workspace::new();
    ws.add_metrics("docling", DOCLING);
    let config = ws.root.join("parsebench.toml");
    let result_dir = ws.result_dir();
    let csv = ws.csv();

    let mut host = TestHost::new();
    parsebench::run(
        &mut host,
        [
            "parsebench",
            "report",
            "--config",
            config.as_str(),
            "--result-dir",
            result_dir.as_str(),
            "--csv",
            csv.as_str(),
            "--no-chart",
        ],
    )
    .unwrap();

    assert!(host.output_str().contains("OMNIDOCBENCH EVALUATION REPORT"));
    assert!(read(&csv).contains("docling,0.12"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_show_replays_written_report() {
    let ws = Workspace::new();
    ws.add_metrics("marker", MARKER);
    ws.add_metrics("docling", DOCLING);

    let (_, result) = ws.report(&["--no-chart"]);
    result.unwrap();

    let csv = ws.csv();
    let mut host = TestHost::new();
    parsebench::run(&mut host, ["parsebench", "show", csv.as_str(), "--color", "never"]).unwrap();

    let output = host.output_str();
    assert!(output.contains("OMNIDOCBENCH EVALUATION REPORT"), "got: {output}");
    assert!(output.contains("docling"));
    assert!(output.contains("marker"));
    assert!(!output.contains("Saved to"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_custom_source_suffix_from_config() {
    let ws = Workspace::new();
    let config = ws.root.join("custom.toml");
    fs::write(
        &config,
        "[[sources]]\nsuffix = \"_page_match_metric_result.json\"\nlabel = \"page\"\n",
    )
    .unwrap();
    fs::write(ws.result_dir().join("docling_page_match_metric_result.json"), DOCLING).unwrap();
    ws.add_metrics("ignored", DOCLING);

    let result_dir = ws.result_dir();
    let csv = ws.csv();
    let mut host = TestHost::new();
    parsebench::run(
        &mut host,
        [
            "parsebench",
            "-c",
            config.as_str(),
            "--result-dir",
            result_dir.as_str(),
            "--csv",
            csv.as_str(),
            "--no-chart",
        ],
    )
    .unwrap();

    let lines: Vec<_> = read(&csv).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("docling (page),"), "got: {lines:?}");
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_invalid_config_is_rejected() {
    let ws = Workspace::new();
    let config = ws.root.join("bad.toml");
    fs::write(&config, "sources = []\n").unwrap();

    let mut host = TestHost::new();
    let result = parsebench::run(&mut host, ["parsebench", "-c", config.as_str()]);
    assert!(result.is_err());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_colliding_backends_are_reported() {
    let ws = Workspace::new();
    let config = ws.root.join("two_sources.toml");
    fs::write(&config, "[[sources]]\nsuffix = \"_quick.json\"\n\n[[sources]]\nsuffix = \".quick.json\"\n").unwrap();
    fs::write(ws.result_dir().join("docling.quick.json"), DOCLING).unwrap();
    fs::write(ws.result_dir().join("docling_quick.json"), MARKER).unwrap();

    let result_dir = ws.result_dir();
    let csv = ws.csv();
    let mut host = TestHost::new();
    parsebench::run(
        &mut host,
        [
            "parsebench",
            "-c",
            config.as_str(),
            "--result-dir",
            result_dir.as_str(),
            "--csv",
            csv.as_str(),
            "--no-chart",
        ],
    )
    .unwrap();

    let errors = host.error_str();
    assert!(errors.contains("docling.quick.json"), "got: {errors}");
    assert!(errors.contains("backend 'docling' is also provided by"), "got: {errors}");

    let lines: Vec<_> = read(&csv).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("docling,0.3,"), "got: {lines:?}");
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_malformed_category_is_reported() {
    let ws = Workspace::new();
    ws.add_metrics(
        "docling",
        r#"{ "text_block": "oops", "table": { "all": { "TEDS": { "all": 0.85 } } } }"#,
    );

    let (host, result) = ws.report(&["--no-chart"]);
    result.unwrap();

    let errors = host.error_str();
    assert!(errors.contains("category 'text_block'"), "got: {errors}");
    assert_eq!(errors.lines().count(), 1);
    assert!(read(&ws.csv()).contains("docling,N/A,N/A,N/A,0.85,N/A,N/A,N/A"));
}

#[test]
#[cfg(feature = "chart")]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_chart_does_not_change_text_or_csv() {
    let ws = Workspace::new();
    ws.add_metrics("marker", MARKER);
    ws.add_metrics("docling", DOCLING);

    let (with_chart, result) = ws.report(&["--chart-font", FIXTURE_FONT]);
    result.unwrap();
    let csv_with_chart = read(&ws.csv());

    let output = with_chart.output_str();
    assert!(output.contains(&format!("Saved chart to {}", ws.chart())), "got: {output}");
    let png = fs::read(ws.chart()).unwrap();
    assert_eq!(&png[1..4], b"PNG");

    fs::remove_file(ws.chart()).unwrap();
    let (without_chart, result) = ws.report(&["--no-chart"]);
    result.unwrap();

    assert!(without_chart.output_str().contains("Skipping chart generation"));
    assert!(!ws.chart().exists());
    assert_eq!(read(&ws.csv()), csv_with_chart);
    assert_eq!(without_chart_notice(&without_chart.output_str()), without_chart_notice(&output));
}

#[test]
#[cfg(feature = "chart")]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_chart_failure_keeps_csv() {
    let ws = Workspace::new();
    ws.add_metrics("docling", DOCLING);

    // The chart's parent directory is a regular file
    let blocker = ws.root.join("blocker");
    fs::write(&blocker, "").unwrap();
    let chart = blocker.join("benchmark_chart.png");

    let (host, result) = ws.report_to(&ws.csv(), &chart, &["--chart-font", FIXTURE_FONT]);
    assert!(result.is_ok(), "chart failure must not fail the run: {result:?}");

    let output = host.output_str();
    assert!(output.contains("Error generating chart"), "got: {output}");
    assert!(output.contains(&format!("Saved to {}", ws.csv())));
    assert!(read(&ws.csv()).contains("docling,0.12"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_csv_failure_still_attempts_chart() {
    let ws = Workspace::new();
    ws.add_metrics("docling", DOCLING);

    // The CSV's parent directory is a regular file
    let blocker = ws.root.join("blocker");
    fs::write(&blocker, "").unwrap();
    let csv = blocker.join("benchmark_report.csv");

    #[cfg(feature = "chart")]
    let chart_args = ["--chart-font", FIXTURE_FONT];
    #[cfg(not(feature = "chart"))]
    let chart_args: [&str; 0] = [];

    let (host, result) = ws.report_to(&csv, &ws.chart(), &chart_args);
    assert!(result.is_err(), "CSV failure must fail the run");

    let output = host.output_str();
    assert!(output.contains("OMNIDOCBENCH EVALUATION REPORT"), "got: {output}");
    assert!(output.contains("Unable to write CSV report"), "got: {output}");

    #[cfg(feature = "chart")]
    {
        assert!(output.contains("Saved chart to"), "got: {output}");
        assert!(ws.chart().exists());
    }

    #[cfg(not(feature = "chart"))]
    assert!(output.contains("Skipping chart generation"), "got: {output}");
}
