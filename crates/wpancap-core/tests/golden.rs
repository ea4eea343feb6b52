use std::fs;
use std::path::{Path, PathBuf};

use wpancap_core::{ConversionOptions, OutputTarget, convert};

fn case_dir(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(dir)
}

fn case_inputs(dir: &Path) -> Vec<PathBuf> {
    let mut inputs: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read case directory")
        .map(|entry| entry.expect("read entry").path())
        .filter(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.starts_with("input"))
        })
        .collect();
    inputs.sort();
    inputs
}

fn load_expected_hex(dir: &Path) -> String {
    let text = fs::read_to_string(dir.join("expected.hex")).expect("read expected.hex");
    text.split_whitespace().collect()
}

fn run_golden(dir: &str) {
    let dir = case_dir(dir);
    let out = tempfile::tempdir().expect("tempdir");
    let output = out.path().join("capture.pcap");
    let options = ConversionOptions::new(case_inputs(&dir), OutputTarget::File(output.clone()));

    let summary = convert(&options).expect("convert");
    assert_eq!(summary.outputs.len(), 1);

    let actual = hex::encode(fs::read(&output).expect("read output"));
    assert_eq!(actual, load_expected_hex(&dir), "golden mismatch in {}", dir.display());
}

#[test]
fn golden_plain_delimited() {
    run_golden("tests/golden/plain_delimited");
}

#[test]
fn golden_bracketed() {
    run_golden("tests/golden/bracketed");
}

#[test]
fn golden_undelimited() {
    run_golden("tests/golden/undelimited");
}

#[test]
fn golden_daintree() {
    run_golden("tests/golden/daintree");
}

#[test]
fn golden_merge() {
    run_golden("tests/golden/merge");
}

#[test]
fn golden_plain_delimited_counts_skipped_lines() {
    let dir = case_dir("tests/golden/plain_delimited");
    let out = tempfile::tempdir().expect("tempdir");
    let options = ConversionOptions::new(
        case_inputs(&dir),
        OutputTarget::File(out.path().join("capture.pcap")),
    );
    let summary = convert(&options).expect("convert");
    assert_eq!(summary.records_total, 3);
    assert_eq!(summary.skipped_lines, 3);
    assert_eq!(summary.sources[0].records, 3);
}
