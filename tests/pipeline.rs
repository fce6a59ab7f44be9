use std::fs;
use std::path::{Path, PathBuf};

use soi_rewrite::discover::output_path;
use soi_rewrite::pipeline::{self, process_file};
use soi_rewrite::{codec, CertificateRewriter, Config, Progress, RewriteError};

const REPORT: &str = "\
ВЕДОМОСТЬ N 17\r\n\
О111-222-333 44  Иванов И.И.       СОИ-111-22  1999\r\n\
О555-666-777 88  Петров П.П.       СОИ-555-66  2001\r\n\
Итого: 2\r\n";

fn write_report(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, codec::encode(text).unwrap()).unwrap();
    path
}

fn write_mapping(report: &Path, json: &str) {
    fs::write(format!("{}.json", report.display()), json).unwrap();
}

fn config(dir: &Path) -> Config {
    Config {
        dir: dir.to_path_buf(),
        ..Config::default()
    }
}

#[test]
fn rewrites_report_and_preserves_everything_else() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let report = write_report(tmp.path(), "report.001", REPORT);
    write_mapping(
        &report,
        r#"{
    "555-666-777 88": "НОМЕР: СОИ-900-01",
    "111-222-333 44": "НОМЕР: СОИ-800-02"
}"#,
    );

    let summary = pipeline::run(&config(tmp.path()), |_| {}).unwrap();
    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].replacements, 2);

    let output = tmp.path().join("report_new.001");
    assert_eq!(summary.files[0].output, output);
    let expected = REPORT
        .replace("СОИ-111-22", "СОИ-800-02")
        .replace("СОИ-555-66", "СОИ-900-01");
    assert_eq!(fs::read(&output).unwrap(), codec::encode(&expected).unwrap());

    // original untouched
    assert_eq!(fs::read(&report).unwrap(), codec::encode(REPORT).unwrap());
}

#[test]
fn untouched_regions_are_byte_identical() {
    let tmp = tempfile::tempdir().expect("tempdir");
    // every cp866 byte except those that could form an identifier or code
    let filler: Vec<u8> = (0..=255u8).filter(|b| !b.is_ascii_digit()).collect();
    let mut bytes = filler.clone();
    bytes.extend(codec::encode("О111-222-333 44 СОИ-111-22").unwrap());
    bytes.extend(&filler);
    let report = tmp.path().join("raw.123");
    fs::write(&report, &bytes).unwrap();
    write_mapping(&report, r#"{"111-222-333 44": "XXXXXXXnewcode"}"#);

    let rewriter = CertificateRewriter::new(7).unwrap();
    let outcome = process_file(&report, &rewriter).unwrap();

    let written = fs::read(&outcome.output).unwrap();
    let mut expected = filler.clone();
    expected.extend(codec::encode("О111-222-333 44 newcode").unwrap());
    expected.extend(&filler);
    assert_eq!(written, expected);
}

#[test]
fn missing_identifier_creates_no_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let report = write_report(tmp.path(), "report.001", REPORT);
    write_mapping(
        &report,
        r#"{"111-222-333 44": "XXXXXXXnew", "000-000-000 00": "XXXXXXXnone"}"#,
    );

    let err = pipeline::run(&config(tmp.path()), |_| {}).unwrap_err();
    assert!(matches!(err, RewriteError::IdentifierNotFound { ref key } if key == "000-000-000 00"));
    assert!(!output_path(&report).exists());
}

#[test]
fn missing_anchor_creates_no_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let report = write_report(tmp.path(), "report.001", "О111-222-333 44 без кода\r\n");
    write_mapping(&report, r#"{"111-222-333 44": "XXXXXXXnew"}"#);

    let err = pipeline::run(&config(tmp.path()), |_| {}).unwrap_err();
    assert!(matches!(err, RewriteError::AnchorNotFound { .. }));
    assert!(!output_path(&report).exists());
}

#[test]
fn missing_mapping_file_halts_run() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_report(tmp.path(), "report.001", REPORT);

    let err = pipeline::run(&config(tmp.path()), |_| {}).unwrap_err();
    assert!(matches!(err, RewriteError::Io { .. }));
}

#[test]
fn first_failing_file_stops_the_batch() {
    let tmp = tempfile::tempdir().expect("tempdir");
    for name in ["a.001", "b.002"] {
        let report = write_report(tmp.path(), name, REPORT);
        write_mapping(&report, r#"{"000-000-000 00": "XXXXXXXnew"}"#);
    }

    let mut started = Vec::new();
    let result = pipeline::run(&config(tmp.path()), |event| {
        if let Progress::Started(path) = event {
            started.push(path.to_path_buf());
        }
    });

    assert!(result.is_err());
    assert_eq!(started.len(), 1);
}

#[test]
fn previous_outputs_are_not_reprocessed() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let report = write_report(tmp.path(), "report.001", REPORT);
    write_mapping(&report, r#"{"111-222-333 44": "XXXXXXXСОИ-999-99"}"#);

    pipeline::run(&config(tmp.path()), |_| {}).unwrap();
    // second run sees only the original, the _new file has no mapping
    let summary = pipeline::run(&config(tmp.path()), |_| {}).unwrap();
    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].input, report);
}

#[test]
fn bootstrap_then_rewrite() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let report = write_report(tmp.path(), "report.001", REPORT);

    let reports = pipeline::run_bootstrap(&config(tmp.path()), |_| {}).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].identifiers, 2);

    let skeleton = fs::read_to_string(&reports[0].mapping_path).unwrap();
    let filled = skeleton
        .replace(r#""111-222-333 44": """#, r#""111-222-333 44": "XXXXXXXA1""#)
        .replace(r#""555-666-777 88": """#, r#""555-666-777 88": "XXXXXXXB2""#);
    fs::write(&reports[0].mapping_path, filled).unwrap();

    let summary = pipeline::run(&config(tmp.path()), |_| {}).unwrap();
    assert_eq!(summary.files[0].replacements, 2);
    let text = codec::decode(&fs::read(output_path(&report)).unwrap());
    assert!(text.contains("Иванов И.И.       A1  1999"));
    assert!(text.contains("Петров П.П.       B2  2001"));
}
